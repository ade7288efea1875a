//! Mission and category definitions.

/// A repeatable task worth a fixed amount of XP per completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    pub id: &'static str,
    pub name: &'static str,
    pub xp: u32,
    /// Bonus missions stack on top of a regular one (e.g. "session before work").
    pub is_bonus: bool,
}

/// A themed group of missions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Display color, `#rrggbb`.
    pub color: &'static str,
    pub missions: Vec<Mission>,
}

const fn m(id: &'static str, name: &'static str, xp: u32) -> Mission {
    Mission {
        id,
        name,
        xp,
        is_bonus: false,
    }
}

const fn bonus(id: &'static str, name: &'static str, xp: u32) -> Mission {
    Mission {
        id,
        name,
        xp,
        is_bonus: true,
    }
}

/// Returns all categories in display order.
pub fn get_all_categories() -> Vec<Category> {
    vec![
        Category {
            id: "physical",
            name: "PHYSICAL",
            color: "#e74c3c",
            missions: vec![
                m("boxing", "Boxing", 60),
                m("street-workout", "Street workout", 40),
                m("running", "Running", 50),
                m("strength", "Strength training", 40),
                m("relax-5min", "Relaxation 5 minutes", 15),
                m("relax-30min", "Relaxation / mobility 30 minutes", 35),
                m("walk-15min", "15 min walk after dinner", 20),
                m("hike", "Organized hike", 100),
                m("bed-9h", "In bed 9 hours before waking", 70),
                bonus("bonus-morning", "Bonus: morning / before-work session", 15),
                bonus("bonus-outdoor-winter", "Bonus: outdoors in winter", 20),
                bonus("bonus-new-sport", "Bonus: trying a new sport", 45),
                bonus("bonus-with-someone", "Bonus: session with someone", 20),
                bonus("bonus-solo-no-music", "Bonus: solo session without music", 15),
                bonus("bonus-4-per-week", "Bonus: 4 sessions this week", 50),
            ],
        },
        Category {
            id: "language",
            name: "LANGUAGE",
            color: "#27ae60",
            missions: vec![
                m("app-15min", "Language app 15 min", 20),
                m("app-30min", "Language app 30 min", 45),
                m("app-45min", "Language app 45 min", 75),
                m("words-before-bed", "Learn 2-3 words before bed", 15),
                m("written-exercises", "Written exercises", 40),
                m("video-original", "Watch a video in the original language", 25),
                bonus("bonus-streak-5d", "Bonus: 5-day streak", 50),
                bonus("bonus-streak-7d", "Bonus: 7-day streak", 80),
            ],
        },
        Category {
            id: "home",
            name: "HOME",
            color: "#f39c12",
            missions: vec![
                m("no-dishes-evening", "No dishes left in the evening", 25),
                m("pack-bag", "Pack tomorrow's bag", 15),
                m("lay-out-clothes", "Lay out tomorrow's clothes", 15),
                m("clean-sneakers", "Clean sneakers", 25),
                m("tidy-15min", "Quick tidy 15 minutes", 10),
                m("tidy-full", "Full tidy", 40),
                m("shopping-list", "Shopping list", 10),
                m("cook-several-days", "Cook for several days", 40),
                m("new-recipe", "New recipe", 30),
                bonus("bonus-free-weekend", "Bonus: chore-free weekend", 50),
            ],
        },
        Category {
            id: "social",
            name: "SOCIAL",
            color: "#e91e63",
            missions: vec![
                m("check-in", "Check in with someone", 15),
                m("spontaneous-outing", "Spontaneous outing", 30),
                m("planned-outing", "Planned outing", 60),
            ],
        },
        Category {
            id: "work",
            name: "WORK",
            color: "#3498db",
            missions: vec![
                m("review-anatomy", "Review anatomy / pathology", 30),
                m("medical-vocabulary", "Review medical vocabulary", 25),
                m("learning-videos", "Learning videos / research", 25),
                m("scientific-papers", "Read scientific papers", 40),
                m("prepare-sessions", "Prepare sessions", 35),
                m("work-project", "Work project / idea", 50),
            ],
        },
        Category {
            id: "food",
            name: "FOOD",
            color: "#9b59b6",
            missions: vec![
                m("batch-cooking", "Batch cooking", 45),
                m("no-snacking", "Day without snacking", 30),
                m("clean-day", "Day without slip-ups", 40),
                bonus("bonus-no-fast-food-week", "Bonus: no fast food this week", 60),
            ],
        },
        Category {
            id: "care",
            name: "CARE",
            color: "#1abc9c",
            missions: vec![
                m("beard", "Beard", 10),
                m("face-hands", "Face and hands", 10),
                m("feet", "Feet", 15),
                bonus("bonus-care-5d", "Bonus: 5 days in a row", 30),
                bonus("bonus-care-7d", "Bonus: 7 days in a row", 50),
            ],
        },
        Category {
            id: "declutter",
            name: "DECLUTTER",
            color: "#795548",
            missions: vec![
                m("sort-photos", "Photos", 20),
                m("sort-mail", "Email", 30),
                m("sort-videos", "Saved videos", 40),
                m("sort-clothes", "Clothes", 60),
                m("sort-paperwork", "Paperwork", 40),
            ],
        },
        Category {
            id: "extra",
            name: "EXTRA",
            color: "#ffd700",
            missions: vec![
                m("early-gift", "Gift bought ahead of time", 50),
                m("home-improvement-idea", "Home improvement idea", 30),
                m("trip-idea", "Vacation / road trip idea", 25),
                m("anecdote", "Anecdote of the day or week", 20),
                m("read-before-bed", "Reading before bed", 20),
            ],
        },
    ]
}
