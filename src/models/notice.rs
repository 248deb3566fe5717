use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The single promotional banner record. There is only ever one row, keyed
/// [`Notice::ACTIVE_ID`]; saving a new notice overwrites the previous one.
/// The same record doubles as the discount/coupon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub message: String,
    pub is_active: bool,
    pub discount_type: DiscountType,
    /// Cents for fixed/threshold/delivery discounts, whole percent for
    /// percentage discounts.
    pub discount_value: i64,
    pub discount_threshold: i64,
    pub discount_code: Option<String>,
    pub expires_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
    Threshold,
    Delivery,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
            DiscountType::Threshold => "threshold",
            DiscountType::Delivery => "delivery",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "fixed" => DiscountType::Fixed,
            "threshold" => DiscountType::Threshold,
            "delivery" => DiscountType::Delivery,
            _ => DiscountType::Percentage,
        }
    }
}

impl Notice {
    pub const ACTIVE_ID: &'static str = "active";

    /// Active and not past its expiry.
    pub fn is_live(&self, now: NaiveDateTime) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires| expires > now)
    }

    pub fn matches_code(&self, code: &str) -> bool {
        self.discount_code
            .as_deref()
            .map_or(false, |c| c.eq_ignore_ascii_case(code.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn notice() -> Notice {
        Notice {
            id: Notice::ACTIVE_ID.to_string(),
            message: "Spring promo".to_string(),
            is_active: true,
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            discount_threshold: 0,
            discount_code: Some("SPRING".to_string()),
            expires_at: Some(dt("2025-07-01 00:00")),
        }
    }

    #[test]
    fn test_is_live_before_expiry() {
        assert!(notice().is_live(dt("2025-06-30 23:59")));
    }

    #[test]
    fn test_is_live_after_expiry() {
        assert!(!notice().is_live(dt("2025-07-01 00:00")));
    }

    #[test]
    fn test_is_live_inactive() {
        let mut n = notice();
        n.is_active = false;
        assert!(!n.is_live(dt("2025-06-01 12:00")));
    }

    #[test]
    fn test_is_live_no_expiry() {
        let mut n = notice();
        n.expires_at = None;
        assert!(n.is_live(dt("2030-01-01 00:00")));
    }

    #[test]
    fn test_matches_code_case_insensitive() {
        assert!(notice().matches_code("spring"));
        assert!(notice().matches_code(" SPRING "));
        assert!(!notice().matches_code("SUMMER"));
    }

    #[test]
    fn test_matches_code_none_set() {
        let mut n = notice();
        n.discount_code = None;
        assert!(!n.matches_code("SPRING"));
    }
}
