use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::section::{ResolvedSection, SectionCatalog};

/// Grocery category guessed from an ingredient name when the ingredient has
/// none. Names line up with the shared store sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, VariantArray, AsRefStr)]
pub enum Category {
    Produce,
    Bakery,
    Meat,
    Seafood,
    Dairy,
    Frozen,
    Pantry,
    Spices,
    Beverages,
    Other,
}

/// Keyword table, checked in order.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Frozen,
        &[
            "frozen", "ice cream", "sorbet", "popsicle",
        ],
    ),
    (
        Category::Pantry,
        &[
            "tomato sauce", "tomato paste", "canned tomatoes", "chicken broth", "beef broth",
            "vegetable broth", "peanut butter", "olive oil", "vegetable oil", "coconut oil",
            "soy sauce", "hot sauce", "coconut milk", "baking powder", "baking soda",
            "cocoa powder", "chocolate chips", "vanilla extract", "flour", "rice", "pasta",
            "spaghetti", "penne", "noodles", "oats", "quinoa", "couscous", "lentils", "beans",
            "chickpeas", "sugar", "yeast", "vinegar", "ketchup", "mustard", "mayonnaise",
            "jam", "honey", "maple syrup", "almonds", "walnuts", "pecans", "cashews",
            "peanuts", "seeds",
        ],
    ),
    (
        Category::Spices,
        &[
            "garlic powder", "onion powder", "chili powder", "cayenne", "black pepper",
            "salt", "pepper", "paprika", "cumin", "coriander", "turmeric", "cinnamon",
            "nutmeg", "oregano", "cardamom", "cloves", "bay leaf", "bay leaves",
        ],
    ),
    (
        Category::Dairy,
        &[
            "sour cream", "cream cheese", "cottage cheese", "milk", "cream", "butter",
            "cheese", "cheddar", "mozzarella", "parmesan", "feta", "ricotta", "yogurt",
            "egg", "eggs",
        ],
    ),
    (
        Category::Seafood,
        &[
            "fish", "salmon", "tuna", "cod", "tilapia", "shrimp", "prawns", "lobster",
            "crab", "scallops", "mussels", "clams",
        ],
    ),
    (
        Category::Meat,
        &[
            "chicken", "turkey", "duck", "beef", "steak", "brisket", "pork", "bacon", "ham",
            "sausage", "lamb", "veal", "mince",
        ],
    ),
    (
        Category::Bakery,
        &[
            "bread", "baguette", "ciabatta", "sourdough", "tortilla", "tortillas", "pita",
            "bagel", "bagels", "croissant", "croissants", "buns", "rolls",
        ],
    ),
    (
        Category::Beverages,
        &[
            "juice", "coffee", "tea", "soda", "sparkling water", "wine", "beer",
        ],
    ),
    (
        Category::Produce,
        &[
            "bell pepper", "sweet potato", "green beans", "spring onion", "tomato",
            "tomatoes", "onion", "onions", "garlic", "lettuce", "carrot", "carrots",
            "celery", "cucumber", "zucchini", "broccoli", "cauliflower", "spinach", "kale",
            "cabbage", "potato", "potatoes", "mushroom", "mushrooms", "peas", "corn",
            "avocado", "eggplant", "squash", "jalapeno", "jalapeño", "ginger", "cilantro",
            "parsley", "basil", "mint", "thyme", "rosemary", "apple", "apples", "banana",
            "bananas", "orange", "oranges", "lemon", "lemons", "lime", "limes",
            "strawberries", "blueberries", "raspberries", "grapes", "mango", "pineapple",
            "watermelon",
        ],
    ),
];

/// Guesses a category from an ingredient name by whole-word keyword match.
pub fn guess_category(ingredient_name: &str) -> Category {
    let normalized = ingredient_name.trim().to_lowercase();
    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();
    let padded = format!(" {} ", words.join(" "));

    // "bell pepper" must win over "pepper", so phrases go first.
    for phrases in [true, false] {
        for (category, keywords) in KEYWORDS {
            if keywords
                .iter()
                .filter(|keyword| keyword.contains(' ') == phrases)
                .any(|keyword| padded.contains(&format!(" {keyword} ")))
            {
                return *category;
            }
        }
    }

    Category::Other
}

/// Maps ingredient categories to store sections of a tenant.
pub struct SectionResolver<'a> {
    catalog: &'a SectionCatalog,
}

impl<'a> SectionResolver<'a> {
    pub fn new(catalog: &'a SectionCatalog) -> Self {
        Self { catalog }
    }

    /// Exact case-insensitive match on the category, then a substring match
    /// in either direction, then the default section. A blank category is
    /// first guessed from the ingredient name.
    pub fn resolve(&self, category: &str, ingredient_name: &str) -> ResolvedSection {
        let category = category.trim();
        let category = if category.is_empty() {
            match guess_category(ingredient_name) {
                Category::Other => return self.catalog.default_section(),
                guessed => guessed.to_string(),
            }
        } else {
            category.to_owned()
        };

        if let Some(section) = self.catalog.by_name(&category) {
            return section.into();
        }

        let needle = category.to_lowercase();
        let partial = self.catalog.iter().find(|section| {
            let name = section.name.to_lowercase();
            !name.is_empty() && (name.contains(&needle) || needle.contains(&name))
        });

        if let Some(section) = partial {
            return section.into();
        }

        tracing::debug!(category = %category, "no store section matched, using default");

        self.catalog.default_section()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::StoreSectionRow;

    fn section(tenant: Option<&str>, name: &str, order: i32) -> StoreSectionRow {
        StoreSectionRow {
            id: name.to_lowercase(),
            tenant_id: tenant.map(|t| t.to_owned()),
            name: name.to_owned(),
            display_order: order,
        }
    }

    fn catalog() -> SectionCatalog {
        SectionCatalog::new(vec![
            section(Some("tenant-a"), "Dairy", 5),
            section(None, "Produce", 10),
            section(None, "Meat", 30),
            section(None, "Dairy", 50),
            section(None, "Pantry", 70),
            section(None, "Spices", 80),
            section(None, "Other", 1000),
        ])
    }

    #[test]
    fn test_guess_category() {
        assert_eq!(guess_category("Tomatoes"), Category::Produce);
        assert_eq!(guess_category("  whole milk "), Category::Dairy);
        assert_eq!(guess_category("Chicken breast"), Category::Meat);
        assert_eq!(guess_category("salmon fillet"), Category::Seafood);
        assert_eq!(guess_category("frozen peas"), Category::Frozen);
        assert_eq!(guess_category("ice cream"), Category::Frozen);
        assert_eq!(guess_category("sea salt"), Category::Spices);
        assert_eq!(guess_category("soy sauce"), Category::Pantry);
        assert_eq!(guess_category("sourdough bread"), Category::Bakery);
        assert_eq!(guess_category("orange juice"), Category::Beverages);
        assert_eq!(guess_category("red bell pepper"), Category::Produce);
        assert_eq!(guess_category("black pepper"), Category::Spices);
        assert_eq!(guess_category("xanthan"), Category::Other);
        assert_eq!(guess_category(""), Category::Other);
    }

    #[test]
    fn test_resolve_exact_prefers_tenant_section() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);

        let resolved = resolver.resolve("dairy", "milk");
        assert_eq!(resolved.name, "Dairy");
        assert_eq!(resolved.display_order, 5);
        assert_eq!(resolver.resolve(" PRODUCE ", "carrot").display_order, 10);
    }

    #[test]
    fn test_resolve_substring_both_directions() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);

        assert_eq!(resolver.resolve("Fresh produce", "kale").name, "Produce");
        assert_eq!(resolver.resolve("spice", "cumin").name, "Spices");
    }

    #[test]
    fn test_resolve_falls_back_to_other() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);

        let resolved = resolver.resolve("Hardware", "nails");
        assert_eq!(resolved.name, "Other");
        assert_eq!(resolved.display_order, 1000);
        assert_eq!(resolver.resolve("", "xanthan").name, "Other");
    }

    #[test]
    fn test_resolve_guesses_blank_category() {
        let catalog = catalog();
        let resolver = SectionResolver::new(&catalog);

        assert_eq!(resolver.resolve("", "Carrots").name, "Produce");
        assert_eq!(resolver.resolve("   ", "ground cumin").name, "Spices");
    }

    #[test]
    fn test_default_section_without_other() {
        let catalog = SectionCatalog::new(vec![section(None, "Produce", 10)]);

        let resolved = catalog.default_section();
        assert_eq!(resolved.name, "Other");
        assert_eq!(resolved.display_order, i32::MAX);
    }
}
