use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    AvailabilitySlot, Booking, BookingStatus, DiscountType, Notice, PaymentStatus, StringProduct,
    StringType, Turnaround,
};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FMT: &str = "%Y-%m-%d";

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).unwrap_or_else(|_| Utc::now().naive_utc())
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FMT).unwrap_or_else(|_| Utc::now().date_naive())
}

// ── Strings ──

pub fn list_strings(
    conn: &Connection,
    type_filter: Option<StringType>,
) -> anyhow::Result<Vec<StringProduct>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, string_type, color, quantity, brand, model, description
         FROM strings WHERE (?1 IS NULL OR string_type = ?1) ORDER BY brand, model, color",
    )?;

    let type_str = type_filter.map(|t| t.as_str());
    let rows = stmt.query_map(params![type_str], parse_string_row)?;

    let mut strings = vec![];
    for row in rows {
        strings.push(row?);
    }
    Ok(strings)
}

pub fn get_string(conn: &Connection, id: &str) -> anyhow::Result<Option<StringProduct>> {
    let result = conn.query_row(
        "SELECT id, name, string_type, color, quantity, brand, model, description
         FROM strings WHERE id = ?1",
        params![id],
        parse_string_row,
    );

    match result {
        Ok(product) => Ok(Some(product)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn insert_string(conn: &Connection, product: &StringProduct) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO strings (id, name, string_type, color, quantity, brand, model, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            product.id,
            product.name,
            product.string_type.as_str(),
            product.color,
            product.quantity,
            product.brand,
            product.model,
            product.description,
        ],
    )?;
    Ok(())
}

pub fn update_string(conn: &Connection, product: &StringProduct) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE strings SET name = ?2, string_type = ?3, color = ?4, quantity = ?5,
                brand = ?6, model = ?7, description = ?8
         WHERE id = ?1",
        params![
            product.id,
            product.name,
            product.string_type.as_str(),
            product.color,
            product.quantity,
            product.brand,
            product.model,
            product.description,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_string(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM strings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

/// Take `quantity` units of one variant, matched the way customers name it
/// (display name + color). Fails without touching anything when stock is
/// short. Targets a single row even if duplicates exist.
pub fn decrement_string_stock(
    conn: &Connection,
    display_name: &str,
    color: &str,
    quantity: i64,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE strings SET quantity = quantity - ?3
         WHERE id = (
             SELECT id FROM strings
             WHERE color = ?2 AND quantity >= ?3
               AND (name = ?1 OR trim(brand || ' ' || model) = ?1)
             LIMIT 1
         )",
        params![display_name, color, quantity],
    )?;
    Ok(count > 0)
}

fn parse_string_row(row: &rusqlite::Row) -> rusqlite::Result<StringProduct> {
    let type_str: String = row.get(2)?;
    Ok(StringProduct {
        id: row.get(0)?,
        name: row.get(1)?,
        string_type: StringType::parse(&type_str),
        color: row.get(3)?,
        quantity: row.get(4)?,
        brand: row.get(5)?,
        model: row.get(6)?,
        description: row.get(7)?,
    })
}

// ── Availability ──

pub fn list_slots(conn: &Connection) -> anyhow::Result<Vec<AvailabilitySlot>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_time, end_time, location, available
         FROM availability ORDER BY date, start_time",
    )?;

    let rows = stmt.query_map([], parse_slot_row)?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row?);
    }
    Ok(slots)
}

pub fn get_slot(conn: &Connection, id: &str) -> anyhow::Result<Option<AvailabilitySlot>> {
    let result = conn.query_row(
        "SELECT id, date, start_time, end_time, location, available
         FROM availability WHERE id = ?1",
        params![id],
        parse_slot_row,
    );

    match result {
        Ok(slot) => Ok(Some(slot)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn insert_slot(conn: &Connection, slot: &AvailabilitySlot) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO availability (id, date, start_time, end_time, location, available)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            slot.id,
            slot.date.format(DATE_FMT).to_string(),
            slot.start_time,
            slot.end_time,
            slot.location,
            slot.available as i32,
        ],
    )?;
    Ok(())
}

pub fn delete_slot(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM availability WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

/// Bulk cleanup of slots on days before `today`. One statement, so a crash
/// can't leave the table half-cleaned.
pub fn delete_past_slots(conn: &Connection, today: NaiveDate) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM availability WHERE date < ?1",
        params![today.format(DATE_FMT).to_string()],
    )?;
    Ok(count)
}

/// Claim a slot for a booking. Returns false when it was already taken (or
/// never existed), which callers treat as a conflict.
pub fn consume_slot(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE availability SET available = 0 WHERE id = ?1 AND available = 1",
        params![id],
    )?;
    Ok(count > 0)
}

fn parse_slot_row(row: &rusqlite::Row) -> rusqlite::Result<AvailabilitySlot> {
    let date_str: String = row.get(1)?;
    Ok(AvailabilitySlot {
        id: row.get(0)?,
        date: parse_date(&date_str),
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        location: row.get(4)?,
        available: row.get::<_, i32>(5)? != 0,
    })
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let rackets_json = serde_json::to_string(&booking.rackets)?;

    conn.execute(
        "INSERT INTO bookings (id, booking_number, full_name, email, phone, rackets, turnaround,
                own_string, grommet_replacement, dropoff_location, dropoff_time,
                pickup_location, pickup_time, notes, status, payment_status,
                agree_to_terms, quoted_total_cents, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            booking.id,
            booking.booking_number,
            booking.full_name,
            booking.email,
            booking.phone,
            rackets_json,
            booking.turnaround.as_str(),
            booking.own_string as i32,
            booking.grommet_replacement as i32,
            booking.dropoff_location,
            booking.dropoff_time,
            booking.pickup_location,
            booking.pickup_time,
            booking.notes,
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.agree_to_terms as i32,
            booking.quoted_total_cents,
            booking.created_at.format(DATETIME_FMT).to_string(),
            booking.updated_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_number, full_name, email, phone, rackets, turnaround,
                own_string, grommet_replacement, dropoff_location, dropoff_time,
                pickup_location, pickup_time, notes, status, payment_status,
                agree_to_terms, quoted_total_cents, created_at, updated_at
         FROM bookings WHERE (?1 IS NULL OR status = ?1)
         ORDER BY created_at DESC LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![status_filter, limit], |row| {
        Ok(parse_booking_row(row))
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, booking_number, full_name, email, phone, rackets, turnaround,
                own_string, grommet_replacement, dropoff_location, dropoff_time,
                pickup_location, pickup_time, notes, status, payment_status,
                agree_to_terms, quoted_total_cents, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Full-row update used by the admin edit path. Last write wins.
pub fn save_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<bool> {
    let rackets_json = serde_json::to_string(&booking.rackets)?;

    let count = conn.execute(
        "UPDATE bookings SET full_name = ?2, email = ?3, phone = ?4, rackets = ?5,
                turnaround = ?6, own_string = ?7, grommet_replacement = ?8,
                dropoff_location = ?9, dropoff_time = ?10, pickup_location = ?11,
                pickup_time = ?12, notes = ?13, status = ?14, payment_status = ?15,
                quoted_total_cents = ?16, updated_at = ?17
         WHERE id = ?1",
        params![
            booking.id,
            booking.full_name,
            booking.email,
            booking.phone,
            rackets_json,
            booking.turnaround.as_str(),
            booking.own_string as i32,
            booking.grommet_replacement as i32,
            booking.dropoff_location,
            booking.dropoff_time,
            booking.pickup_location,
            booking.pickup_time,
            booking.notes,
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.quoted_total_cents,
            booking.updated_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let rackets_json: String = row.get(5)?;
    let turnaround_str: String = row.get(6)?;
    let status_str: String = row.get(14)?;
    let payment_str: String = row.get(15)?;
    let created_at_str: String = row.get(18)?;
    let updated_at_str: String = row.get(19)?;

    Ok(Booking {
        id: row.get(0)?,
        booking_number: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        rackets: serde_json::from_str(&rackets_json).unwrap_or_default(),
        turnaround: Turnaround::parse(&turnaround_str),
        own_string: row.get::<_, i32>(7)? != 0,
        grommet_replacement: row.get::<_, i32>(8)? != 0,
        dropoff_location: row.get(9)?,
        dropoff_time: row.get(10)?,
        pickup_location: row.get(11)?,
        pickup_time: row.get(12)?,
        notes: row.get(13)?,
        status: BookingStatus::parse(&status_str),
        payment_status: PaymentStatus::parse(&payment_str),
        agree_to_terms: row.get::<_, i32>(16)? != 0,
        quoted_total_cents: row.get(17)?,
        created_at: parse_datetime(&created_at_str),
        updated_at: parse_datetime(&updated_at_str),
    })
}

// ── Notices ──

pub fn get_notice(conn: &Connection) -> anyhow::Result<Option<Notice>> {
    let result = conn.query_row(
        "SELECT id, message, is_active, discount_type, discount_value, discount_threshold,
                discount_code, expires_at
         FROM notices WHERE id = ?1",
        params![Notice::ACTIVE_ID],
        parse_notice_row,
    );

    match result {
        Ok(notice) => Ok(Some(notice)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn upsert_notice(conn: &Connection, notice: &Notice) -> anyhow::Result<()> {
    let expires_at = notice
        .expires_at
        .map(|e| e.format(DATETIME_FMT).to_string());

    conn.execute(
        "INSERT INTO notices (id, message, is_active, discount_type, discount_value,
                discount_threshold, discount_code, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
           message = excluded.message,
           is_active = excluded.is_active,
           discount_type = excluded.discount_type,
           discount_value = excluded.discount_value,
           discount_threshold = excluded.discount_threshold,
           discount_code = excluded.discount_code,
           expires_at = excluded.expires_at",
        params![
            Notice::ACTIVE_ID,
            notice.message,
            notice.is_active as i32,
            notice.discount_type.as_str(),
            notice.discount_value,
            notice.discount_threshold,
            notice.discount_code,
            expires_at,
        ],
    )?;
    Ok(())
}

pub fn delete_notice(conn: &Connection) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM notices WHERE id = ?1",
        params![Notice::ACTIVE_ID],
    )?;
    Ok(count > 0)
}

fn parse_notice_row(row: &rusqlite::Row) -> rusqlite::Result<Notice> {
    let type_str: String = row.get(3)?;
    let expires_at_str: Option<String> = row.get(7)?;

    Ok(Notice {
        id: row.get(0)?,
        message: row.get(1)?,
        is_active: row.get::<_, i32>(2)? != 0,
        discount_type: DiscountType::parse(&type_str),
        discount_value: row.get(4)?,
        discount_threshold: row.get(5)?,
        discount_code: row.get(6)?,
        expires_at: expires_at_str
            .and_then(|s| NaiveDateTime::parse_from_str(&s, DATETIME_FMT).ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn sample_string(id: &str, quantity: i64) -> StringProduct {
        StringProduct {
            id: id.to_string(),
            name: "Yonex BG65".to_string(),
            string_type: StringType::Badminton,
            color: "white".to_string(),
            quantity,
            brand: "Yonex".to_string(),
            model: "BG65".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_string_crud_roundtrip() {
        let conn = setup_db();
        insert_string(&conn, &sample_string("s1", 5)).unwrap();

        let mut loaded = get_string(&conn, "s1").unwrap().unwrap();
        assert_eq!(loaded.quantity, 5);
        assert_eq!(loaded.string_type, StringType::Badminton);

        loaded.quantity = 2;
        assert!(update_string(&conn, &loaded).unwrap());
        assert_eq!(get_string(&conn, "s1").unwrap().unwrap().quantity, 2);

        assert!(delete_string(&conn, "s1").unwrap());
        assert!(!delete_string(&conn, "s1").unwrap());
        assert!(get_string(&conn, "s1").unwrap().is_none());
    }

    #[test]
    fn test_list_strings_type_filter() {
        let conn = setup_db();
        insert_string(&conn, &sample_string("s1", 5)).unwrap();
        let mut tennis = sample_string("s2", 3);
        tennis.string_type = StringType::Tennis;
        insert_string(&conn, &tennis).unwrap();

        assert_eq!(list_strings(&conn, None).unwrap().len(), 2);
        let badminton = list_strings(&conn, Some(StringType::Badminton)).unwrap();
        assert_eq!(badminton.len(), 1);
        assert_eq!(badminton[0].id, "s1");
    }

    #[test]
    fn test_decrement_string_stock_by_display_name() {
        let conn = setup_db();
        insert_string(&conn, &sample_string("s1", 3)).unwrap();

        assert!(decrement_string_stock(&conn, "Yonex BG65", "white", 2).unwrap());
        assert_eq!(get_string(&conn, "s1").unwrap().unwrap().quantity, 1);

        // Not enough left; stock untouched.
        assert!(!decrement_string_stock(&conn, "Yonex BG65", "white", 2).unwrap());
        assert_eq!(get_string(&conn, "s1").unwrap().unwrap().quantity, 1);

        assert!(!decrement_string_stock(&conn, "Yonex BG65", "yellow", 1).unwrap());
    }

    #[test]
    fn test_consume_slot_only_once() {
        let conn = setup_db();
        let slot = AvailabilitySlot {
            id: "a1".to_string(),
            date: NaiveDate::parse_from_str("2025-06-16", "%Y-%m-%d").unwrap(),
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            location: "Northside".to_string(),
            available: true,
        };
        insert_slot(&conn, &slot).unwrap();

        assert!(consume_slot(&conn, "a1").unwrap());
        assert!(!consume_slot(&conn, "a1").unwrap());
        assert!(!get_slot(&conn, "a1").unwrap().unwrap().available);
    }

    #[test]
    fn test_delete_past_slots() {
        let conn = setup_db();
        let mut slot = AvailabilitySlot {
            id: "a1".to_string(),
            date: NaiveDate::parse_from_str("2025-06-10", "%Y-%m-%d").unwrap(),
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            location: "Northside".to_string(),
            available: true,
        };
        insert_slot(&conn, &slot).unwrap();
        slot.id = "a2".to_string();
        slot.date = NaiveDate::parse_from_str("2025-06-16", "%Y-%m-%d").unwrap();
        insert_slot(&conn, &slot).unwrap();

        let today = NaiveDate::parse_from_str("2025-06-16", "%Y-%m-%d").unwrap();
        assert_eq!(delete_past_slots(&conn, today).unwrap(), 1);

        let remaining = list_slots(&conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "a2");
    }

    #[test]
    fn test_notice_upsert_overwrites() {
        let conn = setup_db();
        let mut notice = Notice {
            id: Notice::ACTIVE_ID.to_string(),
            message: "first".to_string(),
            is_active: true,
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            discount_threshold: 0,
            discount_code: None,
            expires_at: None,
        };
        upsert_notice(&conn, &notice).unwrap();
        notice.message = "second".to_string();
        upsert_notice(&conn, &notice).unwrap();

        let loaded = get_notice(&conn).unwrap().unwrap();
        assert_eq!(loaded.message, "second");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        assert!(delete_notice(&conn).unwrap());
        assert!(!delete_notice(&conn).unwrap());
    }
}
