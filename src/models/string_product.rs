use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringProduct {
    pub id: String,
    pub name: String,
    pub string_type: StringType,
    pub color: String,
    pub quantity: i64,
    pub brand: String,
    pub model: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StringType {
    Tennis,
    Badminton,
}

impl StringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringType::Tennis => "tennis",
            StringType::Badminton => "badminton",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "badminton" => StringType::Badminton,
            _ => StringType::Tennis,
        }
    }
}

impl StringProduct {
    /// Customers shop by "{brand} {model}"; the raw product name is the
    /// fallback when either half is missing.
    pub fn display_name(&self) -> String {
        if !self.brand.is_empty() && !self.model.is_empty() {
            format!("{} {}", self.brand, self.model)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: &str, model: &str) -> StringProduct {
        StringProduct {
            id: "s1".to_string(),
            name: name.to_string(),
            string_type: StringType::Tennis,
            color: "white".to_string(),
            quantity: 1,
            brand: brand.to_string(),
            model: model.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_display_name_from_brand_and_model() {
        assert_eq!(
            product("whatever", "Yonex", "BG65").display_name(),
            "Yonex BG65"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        assert_eq!(product("House String", "", "BG65").display_name(), "House String");
        assert_eq!(product("House String", "Yonex", "").display_name(), "House String");
    }
}
