pub mod availability;
pub mod booking;
pub mod notice;
pub mod string_product;

pub use availability::{parse_clock, AvailabilitySlot};
pub use booking::{Booking, BookingStatus, PaymentStatus, RacketLineItem, Turnaround};
pub use notice::{DiscountType, Notice};
pub use string_product::{StringProduct, StringType};
