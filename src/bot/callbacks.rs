//! Inline button payloads
//!
//! Payloads are `|`-separated so slot datetimes (which contain `:`) survive
//! unescaped, and stay well under Telegram's 64-byte callback data limit.

use crate::models::schedule::SlotStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    ExampleSchedule,
    ExampleBooking,
    ShowSchedule,
    /// Upcoming days with slots, one button each
    ListDays,
    ViewDay(String),
    /// Actions for one slot
    SlotMenu(String),
    SetStatus(String, SlotStatus),
    DeleteSlot(String),
    ClearDay(String),
    /// Buttons for hours that can still be added to a day
    AddHoursMenu(String),
    AddHour(String, u32),
    AddStandardHours(String),
}

impl AdminAction {
    pub fn encode(&self) -> String {
        match self {
            AdminAction::ExampleSchedule => "example_schedule".to_string(),
            AdminAction::ExampleBooking => "example_booking".to_string(),
            AdminAction::ShowSchedule => "example_show".to_string(),
            AdminAction::ListDays => "days".to_string(),
            AdminAction::ViewDay(date_key) => format!("day|{}", date_key),
            AdminAction::SlotMenu(datetime) => format!("slot|{}", datetime),
            AdminAction::SetStatus(datetime, status) => format!("set|{}|{}", datetime, status),
            AdminAction::DeleteSlot(datetime) => format!("del|{}", datetime),
            AdminAction::ClearDay(date_key) => format!("clear|{}", date_key),
            AdminAction::AddHoursMenu(date_key) => format!("add|{}", date_key),
            AdminAction::AddHour(date_key, hour) => format!("addh|{}|{}", date_key, hour),
            AdminAction::AddStandardHours(date_key) => format!("std|{}", date_key),
        }
    }

    pub fn decode(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split('|').collect();
        let action = match parts.as_slice() {
            ["example_schedule"] => AdminAction::ExampleSchedule,
            ["example_booking"] => AdminAction::ExampleBooking,
            ["example_show"] => AdminAction::ShowSchedule,
            ["days"] => AdminAction::ListDays,
            ["day", date_key] => AdminAction::ViewDay(date_key.to_string()),
            ["slot", datetime] => AdminAction::SlotMenu(datetime.to_string()),
            ["set", datetime, status] => {
                AdminAction::SetStatus(datetime.to_string(), status.parse().ok()?)
            }
            ["del", datetime] => AdminAction::DeleteSlot(datetime.to_string()),
            ["clear", date_key] => AdminAction::ClearDay(date_key.to_string()),
            ["add", date_key] => AdminAction::AddHoursMenu(date_key.to_string()),
            ["addh", date_key, hour] => AdminAction::AddHour(date_key.to_string(), hour.parse().ok()?),
            ["std", date_key] => AdminAction::AddStandardHours(date_key.to_string()),
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_slot_actions() {
        assert_eq!(
            AdminAction::decode("set|2026-03-15T14:00:00|blocked"),
            Some(AdminAction::SetStatus(
                "2026-03-15T14:00:00".to_string(),
                SlotStatus::Blocked
            ))
        );
        assert_eq!(
            AdminAction::decode("addh|2026-03-15|9"),
            Some(AdminAction::AddHour("2026-03-15".to_string(), 9))
        );
        assert_eq!(AdminAction::decode("example_show"), Some(AdminAction::ShowSchedule));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(AdminAction::decode(""), None);
        assert_eq!(AdminAction::decode("set|2026-03-15T14:00:00|free"), None);
        assert_eq!(AdminAction::decode("addh|2026-03-15|nine"), None);
        assert_eq!(AdminAction::decode("day"), None);
    }

    #[test]
    fn test_payloads_fit_callback_limit() {
        let longest = AdminAction::SetStatus("2026-03-15T14:00:00".to_string(), SlotStatus::Available);
        assert!(longest.encode().len() <= 64);
        assert_eq!(AdminAction::decode(&longest.encode()), Some(longest));
    }
}
