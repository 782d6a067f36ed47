//! The built-in, read-only joke catalog.

/// Identifies a category; only obtainable from the catalog itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(&'static str);

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub jokes: &'static [&'static str],
}

static CATEGORIES: [Category; 2] = [
    Category {
        id: CategoryId("One Liners Jokes"),
        name: "One Liners Jokes",
        jokes: &[
            "I told my wife she was drawing her eyebrows too high. She looked surprised!",
            "Im on a whiskey diet\u{2014}Ive lost three days already!",
            "I used to play piano by ear, but now I use my hands.",
            "I would tell you a joke about an elevator, but its an uplifting experience!",
        ],
    },
    Category {
        id: CategoryId("Dad Jokes"),
        name: "Dad Jokes",
        jokes: &[
            "Why dont skeletons fight each other? They dont have the guts!",
            "I used to have a handle on life, but then it broke.",
            "Why did the scarecrow win an award? Because he was outstanding in his field!",
            "Im afraid for the calendar. Its days are numbered.",
            "Why did the golfer bring two pairs of pants? In case he got a hole in one!",
        ],
    },
];

/// All categories in display order.
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id.0 == id)
}

pub fn get(id: CategoryId) -> &'static Category {
    // A CategoryId can only come from CATEGORIES, so the lookup always hits.
    CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .unwrap_or(&CATEGORIES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_and_sizes() {
        let names: Vec<_> = categories().iter().map(|c| c.name).collect();
        assert_eq!(names, ["One Liners Jokes", "Dad Jokes"]);
        assert_eq!(categories()[0].jokes.len(), 4);
        assert_eq!(categories()[1].jokes.len(), 5);
    }

    #[test]
    fn find_by_id() {
        let dad = find("Dad Jokes").expect("dad jokes exist");
        assert_eq!(dad.id.as_str(), "Dad Jokes");
        assert!(std::ptr::eq(get(dad.id), dad));
        assert!(find("Knock Knock").is_none());
    }
}
