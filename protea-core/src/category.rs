//! Keyword-based spending categories.
//!
//! Categorization is config data, not parsing logic: a transaction gets the
//! first category whose keyword list matches its description. Callers can
//! prepend their own rules ahead of the built-in ZAR set.

use serde::{Deserialize, Serialize};

/// High-level spending categories for ZAR statements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "groceries")]
    Groceries,
    #[serde(rename = "food-drink")]
    FoodAndDrink,
    #[serde(rename = "fuel-transport")]
    FuelAndTransport,
    #[serde(rename = "health-pharmacy")]
    HealthAndPharmacy,
    #[serde(rename = "clothing")]
    ClothingAndAccessories,
    #[serde(rename = "entertainment-digital")]
    EntertainmentAndDigital,
    #[serde(rename = "education")]
    EducationAndSchool,
    #[serde(rename = "rent")]
    Rent,
    #[serde(rename = "utilities")]
    Utilities,
    #[serde(rename = "airtime")]
    Airtime,
    #[serde(rename = "insurance")]
    Insurance,
    #[serde(rename = "transfers-income")]
    TransfersAndIncome,
    #[serde(rename = "bank-charges")]
    BankCharges,
    #[serde(rename = "other")]
    Other,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::FoodAndDrink => "Food & Drink",
            Category::FuelAndTransport => "Fuel & Transport",
            Category::HealthAndPharmacy => "Health & Pharmacy",
            Category::ClothingAndAccessories => "Clothing & Accessories",
            Category::EntertainmentAndDigital => "Entertainment & Digital",
            Category::EducationAndSchool => "Education & School",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Airtime => "Airtime",
            Category::Insurance => "Insurance",
            Category::TransfersAndIncome => "Transfers & Income",
            Category::BankCharges => "Bank Charges & Fees",
            Category::Other => "Other",
        }
    }
}

/// One categorization rule: any keyword hit assigns the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

fn builtin_rules() -> Vec<KeywordRule> {
    let rule = |category, keywords: &[&str]| KeywordRule {
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    };
    vec![
        rule(
            Category::Groceries,
            &[
                "woolworths", "pick n pay", "pnp", "spar", "checkers", "food lovers",
                "fruit and veg",
            ],
        ),
        rule(
            Category::HealthAndPharmacy,
            &["clicks", "dis-chem", "pharmacy", "chemist", "clinic", "hospital", "discovery"],
        ),
        rule(
            Category::ClothingAndAccessories,
            &["mr price", "mrp", "edgars", "pep", "sportscene", "sheetstreet", "tekkie"],
        ),
        rule(
            Category::FoodAndDrink,
            &[
                "kfc", "mcd", "spur", "steers", "nando", "restaurant", "coffee", "pizza",
                "burger", "galitos",
            ],
        ),
        rule(
            Category::FuelAndTransport,
            &[
                "engen", "sasol", "shell", "caltex", "total", "petrol", "diesel", "fuel",
                "garage", "parking", "uber", "bolt",
            ],
        ),
        rule(
            Category::EntertainmentAndDigital,
            &[
                "spotify", "netflix", "showmax", "dstv", "apple.com", "microsoft", "itunes",
                "playstation", "cinema", "planet fitness", "gym",
            ],
        ),
        rule(
            Category::EducationAndSchool,
            &["school", "laerskool", "tuition", "scholar", "uniform", "fees"],
        ),
        rule(Category::Rent, &["rent", "lease", "landlord"]),
        rule(
            Category::Utilities,
            &["municipal", "utilities", "water", "electricity", "prepaid elec"],
        ),
        rule(Category::Airtime, &["airtime", "recharge"]),
        rule(
            Category::Insurance,
            &["insurance", "outsurance", "santam", "assupol"],
        ),
        rule(
            Category::TransfersAndIncome,
            &[
                "salary", "magtape credit", "fnb app transfer", "transfer from", "received",
            ],
        ),
        rule(
            Category::BankCharges,
            &[
                "byc debit", "service fee", "bank charge", "facility fee", "admin fee",
                "interest",
            ],
        ),
        rule(
            Category::Airtime,
            &["telkom", "vodacom", "mtn", "cell c", "rain"],
        ),
    ]
}

/// Matches descriptions against an ordered rule table, first hit wins.
pub struct Categorizer {
    rules: Vec<KeywordRule>,
}

impl Categorizer {
    /// Built-in ZAR keyword rules only.
    pub fn new() -> Categorizer {
        Categorizer {
            rules: builtin_rules(),
        }
    }

    /// Custom rules take priority over the built-in table.
    pub fn with_custom_rules(custom: Vec<KeywordRule>) -> Categorizer {
        let mut rules = custom;
        rules.extend(builtin_rules());
        Categorizer { rules }
    }

    pub fn categorize(&self, description: &str) -> Category {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| desc.contains(k.as_str())) {
                return rule.category;
            }
        }
        // Unmatched credit-ish descriptions still count as income/transfers.
        if ["credit", "transfer", "salary"].iter().any(|k| desc.contains(k)) {
            return Category::TransfersAndIncome;
        }
        Category::Other
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Categorizer::new()
    }
}

/// Categorize a description using the built-in rules.
pub fn categorize(description: &str) -> Category {
    Categorizer::new().categorize(description)
}
