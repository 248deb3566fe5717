use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{AvailabilitySlot, DiscountType, Notice, StringProduct, StringType};

pub struct SeedCounts {
    pub strings: usize,
    pub slots: usize,
    pub notices: usize,
}

/// Wipe and repopulate strings, availability, and the notice. Bookings are
/// left alone.
pub fn reseed(conn: &Connection, today: NaiveDate) -> anyhow::Result<SeedCounts> {
    conn.execute_batch("DELETE FROM strings; DELETE FROM availability; DELETE FROM notices;")?;

    let strings = sample_strings();
    for product in &strings {
        queries::insert_string(conn, product)?;
    }

    let slots = sample_slots(today);
    for slot in &slots {
        queries::insert_slot(conn, slot)?;
    }

    queries::upsert_notice(conn, &sample_notice())?;

    Ok(SeedCounts {
        strings: strings.len(),
        slots: slots.len(),
        notices: 1,
    })
}

fn string(
    string_type: StringType,
    brand: &str,
    model: &str,
    color: &str,
    quantity: i64,
    description: &str,
) -> StringProduct {
    StringProduct {
        id: Uuid::new_v4().to_string(),
        name: format!("{brand} {model}"),
        string_type,
        color: color.to_string(),
        quantity,
        brand: brand.to_string(),
        model: model.to_string(),
        description: Some(description.to_string()),
    }
}

fn sample_strings() -> Vec<StringProduct> {
    vec![
        string(
            StringType::Badminton,
            "Yonex",
            "BG65",
            "white",
            12,
            "Durable all-rounder, the default club string",
        ),
        string(
            StringType::Badminton,
            "Yonex",
            "BG65",
            "yellow",
            6,
            "Durable all-rounder, the default club string",
        ),
        string(
            StringType::Badminton,
            "Yonex",
            "Exbolt 63",
            "red",
            4,
            "Thin gauge, sharp repulsion",
        ),
        string(
            StringType::Badminton,
            "Li-Ning",
            "No.1",
            "white",
            5,
            "High tension tolerance",
        ),
        string(
            StringType::Tennis,
            "Luxilon",
            "ALU Power",
            "silver",
            8,
            "Tour-standard poly",
        ),
        string(
            StringType::Tennis,
            "Babolat",
            "RPM Blast",
            "black",
            7,
            "Spin-oriented octagonal poly",
        ),
        string(
            StringType::Tennis,
            "Wilson",
            "NXT",
            "natural",
            3,
            "Soft multifilament for comfort",
        ),
    ]
}

fn sample_slots(today: NaiveDate) -> Vec<AvailabilitySlot> {
    let locations = ["Northside Courts", "Riverside Club"];
    let windows = [("10:00", "12:00"), ("17:00", "19:30")];

    let mut slots = vec![];
    for day in 1..=7i64 {
        let date = today + Duration::days(day);
        for location in locations {
            for (start, end) in windows {
                slots.push(AvailabilitySlot {
                    id: Uuid::new_v4().to_string(),
                    date,
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                    location: location.to_string(),
                    available: true,
                });
            }
        }
    }
    slots
}

fn sample_notice() -> Notice {
    Notice {
        id: Notice::ACTIVE_ID.to_string(),
        message: "Grand opening: 10% off all restrings".to_string(),
        is_active: true,
        discount_type: DiscountType::Percentage,
        discount_value: 10,
        discount_threshold: 0,
        discount_code: Some("OPENING10".to_string()),
        expires_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_reseed_is_destructive_and_repeatable() {
        let conn = db::init_db(":memory:").unwrap();
        let today = NaiveDate::parse_from_str("2025-06-16", "%Y-%m-%d").unwrap();

        let first = reseed(&conn, today).unwrap();
        let second = reseed(&conn, today).unwrap();
        assert_eq!(first.strings, second.strings);

        let strings = queries::list_strings(&conn, None).unwrap();
        assert_eq!(strings.len(), second.strings);

        let slots = queries::list_slots(&conn).unwrap();
        assert_eq!(slots.len(), second.slots);
        assert!(slots.iter().all(|s| s.date > today));

        assert!(queries::get_notice(&conn).unwrap().is_some());
    }
}
