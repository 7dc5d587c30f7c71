//! Administrator command and button handling

use chrono::{Local, NaiveDate, NaiveDateTime, Weekday};

use super::{
    calendar::{self, date_key, format_date_key, format_day, next_weekday, parse_date_key},
    callbacks::AdminAction,
    commands::{parse_command, AdminCommand, Week},
    BotReply, Button,
};
use crate::{
    config::{BotConfig, ScheduleConfig},
    models::schedule::{date_key_of, hour_datetime, parse_slot_datetime, SlotStatus, TimeSlot},
    services::schedules::SchedulesService,
    AppState,
};

const USAGE: &str = "Не понял команду. Используйте:\n\
    • \"расписание на эту неделю с 10 до 22\"\n\
    • \"в пятницу бронь на 15:00 на 3 часа\"\n\
    • \"покажи расписание\"";

#[derive(Clone)]
pub struct AdminBot {
    schedules: SchedulesService,
    admin_chat_id: Option<i64>,
    settings: ScheduleConfig,
}

impl AdminBot {
    pub fn new(schedules: SchedulesService, bot: &BotConfig, settings: &ScheduleConfig) -> Self {
        Self {
            schedules,
            admin_chat_id: bot.admin_chat_id,
            settings: settings.clone(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.services.schedules.clone(),
            &state.config.bot,
            &state.config.schedule,
        )
    }

    /// Only the configured chat may administer; any chat when none is configured
    pub fn is_authorized(&self, chat_id: i64) -> bool {
        self.admin_chat_id.map_or(true, |admin| admin == chat_id)
    }

    /// Greeting for `/start`
    pub fn start(&self, chat_id: i64) -> BotReply {
        if !self.is_authorized(chat_id) {
            tracing::warn!("Rejected /start from chat {}", chat_id);
            return BotReply::text("⛔ Этот бот только для администратора.");
        }

        BotReply::text(
            "Привет! Я бот управления расписанием бани.\n\n\
             Примеры команд:\n\n\
             📅 Расписание:\n\
             \"расписание на эту неделю с 10 до 22\"\n\
             \"расписание на следующую неделю с 10 до 22\"\n\n\
             🔴 Бронь:\n\
             \"в пятницу бронь на 15:00 на 3 часа\"\n\
             \"в понедельник бронь на 10:00 на 2 часа\"\n\n\
             📋 Показать:\n\
             \"покажи расписание\"",
        )
        .with_keyboard(vec![
            vec![
                Button::new("📅 Пример расписания", AdminAction::ExampleSchedule),
                Button::new("🔴 Пример брони", AdminAction::ExampleBooking),
            ],
            vec![
                Button::new("📋 Показать расписание", AdminAction::ShowSchedule),
                Button::new("🗓 Дни", AdminAction::ListDays),
            ],
        ])
    }

    pub fn handle_text(&self, chat_id: i64, text: &str) -> BotReply {
        self.handle_text_at(chat_id, text, Local::now().naive_local())
    }

    pub fn handle_text_at(&self, chat_id: i64, text: &str, now: NaiveDateTime) -> BotReply {
        if !self.is_authorized(chat_id) {
            tracing::warn!("Rejected command from chat {}", chat_id);
            return access_denied();
        }

        let Some(command) = parse_command(text) else {
            tracing::debug!("Unrecognized command: {}", text);
            return BotReply::text(USAGE);
        };
        tracing::info!("Admin command: {:?}", command);

        let today = now.date();
        match command {
            AdminCommand::ShowSchedule => self.show_schedule(now),
            AdminCommand::BuildWeek {
                week,
                start_hour,
                end_hour,
            } => self.build_week(today, week, start_hour, end_hour),
            AdminCommand::Book {
                weekday,
                hour,
                hours,
            } => self.book(today, weekday, hour, hours),
            AdminCommand::UnknownWeekday(name) => {
                BotReply::text(format!("Не понял день недели: \"{}\"", name))
            }
        }
    }

    pub fn handle_action(&self, chat_id: i64, data: &str) -> BotReply {
        self.handle_action_at(chat_id, data, Local::now().naive_local())
    }

    pub fn handle_action_at(&self, chat_id: i64, data: &str, now: NaiveDateTime) -> BotReply {
        if !self.is_authorized(chat_id) {
            tracing::warn!("Rejected button press from chat {}", chat_id);
            return access_denied();
        }

        let Some(action) = AdminAction::decode(data) else {
            tracing::debug!("Unknown button payload: {}", data);
            return BotReply::text(USAGE);
        };

        match action {
            AdminAction::ExampleSchedule => {
                BotReply::text("Отправьте: расписание на эту неделю с 10 до 22")
            }
            AdminAction::ExampleBooking => {
                BotReply::text("Отправьте: в пятницу бронь на 15:00 на 3 часа")
            }
            AdminAction::ShowSchedule => self.show_schedule(now),
            AdminAction::ListDays => self.list_days(now.date()),
            AdminAction::ViewDay(key) => self.with_date(&key, |day| self.view_day(day, None)),
            AdminAction::SlotMenu(datetime) => self.slot_menu(&datetime),
            AdminAction::SetStatus(datetime, status) => self.set_status(&datetime, status),
            AdminAction::DeleteSlot(datetime) => self.delete_slot(&datetime),
            AdminAction::ClearDay(key) => self.with_date(&key, |day| self.clear_day(day)),
            AdminAction::AddHoursMenu(key) => {
                self.with_date(&key, |day| self.add_hours_menu(day))
            }
            AdminAction::AddHour(key, hour) => {
                if hour >= 24 {
                    return BotReply::text(format!("Некорректный час: {}", hour));
                }
                self.with_date(&key, |day| self.add_hours(day, &[hour]))
            }
            AdminAction::AddStandardHours(key) => {
                self.with_date(&key, |day| self.add_hours(day, &self.settings.standard_hours))
            }
        }
    }

    // ---- Text commands ----

    fn show_schedule(&self, now: NaiveDateTime) -> BotReply {
        let stats = self.schedules.stats_at(now);
        let days = self
            .schedules
            .scheduled_days_from(now.date(), self.settings.show_days);

        let mut text = format!(
            "📊 *Статистика:*\n\n\
             • Всего слотов: {}\n\
             • 🟢 Свободно: {}\n\
             • 🔴 Забронировано: {}\n\
             • ⛔ Заблокировано: {}\n\n",
            stats.total, stats.available, stats.booked, stats.blocked
        );

        if days.is_empty() {
            text.push_str(
                "Расписание пусто. Создайте расписание командой:\n\
                 \"расписание на эту неделю с 10 до 22\"",
            );
            return BotReply::text(text).markdown();
        }

        text.push_str("📅 *Ближайшие дни:*\n\n");
        for key in &days {
            let slots = self.schedules.slots_for_date(key);
            let available = count_status(&slots, SlotStatus::Available);
            let booked = count_status(&slots, SlotStatus::Booked);
            text.push_str(&format!(
                "{} — 🟢 {} / 🔴 {}\n",
                format_date_key(key),
                available,
                booked
            ));
        }

        BotReply::text(text).markdown().with_keyboard(day_buttons(&days))
    }

    fn build_week(&self, today: NaiveDate, week: Week, start_hour: u32, end_hour: u32) -> BotReply {
        let days = calendar::week_days(today, week, self.settings.off_day);

        let mut total_added = 0;
        let mut labels = Vec::with_capacity(days.len());
        for day in &days {
            total_added += self
                .schedules
                .add_day_slots(&date_key(*day), start_hour, end_hour)
                .len();
            labels.push(format_day(*day));
        }

        let week_label = match week {
            Week::This => "эту",
            Week::Next => "следующую",
        };
        BotReply::text(format!(
            "✅ Расписание создано!\n\n\
             Неделя: {}\n\
             Время: {}:00 - {}:00\n\
             Добавлено слотов: {}\n\n\
             Дни:\n{}",
            week_label,
            start_hour,
            end_hour,
            total_added,
            labels.join("\n")
        ))
    }

    fn book(&self, today: NaiveDate, weekday: Weekday, hour: u32, hours: u32) -> BotReply {
        let day = next_weekday(today, weekday);
        let key = date_key(day);
        let count = self
            .schedules
            .book_range(&key, hour, hours, Some(&self.settings.booking_note));

        if count == 0 {
            return BotReply::text(format!(
                "Не удалось забронировать. Убедитесь, что слоты на {} созданы.",
                format_day(day)
            ));
        }

        BotReply::text(format!(
            "✅ Бронь создана!\n\n\
             Дата: {}\n\
             Время: {}:00 - {}:00\n\
             Заблокировано слотов: {}",
            format_day(day),
            hour,
            hour + hours,
            count
        ))
        .with_keyboard(vec![vec![Button::new(
            "📅 Открыть день",
            AdminAction::ViewDay(key),
        )]])
    }

    // ---- Interactive administration ----

    fn with_date(&self, key: &str, f: impl FnOnce(NaiveDate) -> BotReply) -> BotReply {
        match parse_date_key(key) {
            Some(day) => f(day),
            None => BotReply::text(format!("Некорректная дата: {}", key)),
        }
    }

    fn list_days(&self, today: NaiveDate) -> BotReply {
        let days = self
            .schedules
            .scheduled_days_from(today, self.settings.show_days);
        if days.is_empty() {
            return BotReply::text("Расписание пусто.");
        }
        BotReply::text("Выберите день:").with_keyboard(day_buttons(&days))
    }

    fn view_day(&self, day: NaiveDate, notice: Option<String>) -> BotReply {
        let key = date_key(day);
        let slots = self.schedules.slots_for_date(&key);

        let mut text = notice.map(|n| format!("{}\n\n", n)).unwrap_or_default();
        text.push_str(&format!("📅 {}\n\n", format_day(day)));
        if slots.is_empty() {
            text.push_str("Слотов нет.");
        }
        for slot in &slots {
            text.push_str(&slot_line(slot));
            text.push('\n');
        }

        let mut keyboard: Vec<Vec<Button>> = slots
            .chunks(4)
            .map(|row| {
                row.iter()
                    .map(|slot| {
                        Button::new(
                            format!("{} {}", status_icon(slot.status), slot_time(slot)),
                            AdminAction::SlotMenu(slot.datetime.clone()),
                        )
                    })
                    .collect()
            })
            .collect();
        keyboard.push(vec![
            Button::new("➕ Добавить часы", AdminAction::AddHoursMenu(key.clone())),
            Button::new("🗑 Очистить день", AdminAction::ClearDay(key)),
        ]);
        keyboard.push(vec![Button::new("⬅️ К списку дней", AdminAction::ListDays)]);

        BotReply::text(text).with_keyboard(keyboard)
    }

    fn slot_menu(&self, datetime: &str) -> BotReply {
        let key = date_key_of(datetime).to_string();
        let Some(slot) = self
            .schedules
            .slots_for_date(&key)
            .into_iter()
            .find(|s| s.datetime == datetime)
        else {
            return slot_not_found(key);
        };

        let status_row: Vec<Button> = [SlotStatus::Available, SlotStatus::Booked, SlotStatus::Blocked]
            .into_iter()
            .filter(|status| *status != slot.status)
            .map(|status| {
                Button::new(
                    format!("{} {}", status_icon(status), status_label(status)),
                    AdminAction::SetStatus(slot.datetime.clone(), status),
                )
            })
            .collect();

        BotReply::text(format!("{} {}", format_date_key(&key), slot_line(&slot))).with_keyboard(vec![
            status_row,
            vec![Button::new(
                "❌ Удалить слот",
                AdminAction::DeleteSlot(slot.datetime.clone()),
            )],
            vec![Button::new("⬅️ Назад", AdminAction::ViewDay(key))],
        ])
    }

    fn set_status(&self, datetime: &str, status: SlotStatus) -> BotReply {
        let note = match status {
            SlotStatus::Booked => Some(self.settings.booking_note.as_str()),
            SlotStatus::Available | SlotStatus::Blocked => None,
        };
        let key = date_key_of(datetime).to_string();

        match self.schedules.set_slot_status(datetime, status, note) {
            Some(slot) => self.with_date(&key, |day| {
                self.view_day(
                    day,
                    Some(format!("✅ {} — {}", slot_time(&slot), status_label(status))),
                )
            }),
            None => slot_not_found(key),
        }
    }

    fn delete_slot(&self, datetime: &str) -> BotReply {
        let key = date_key_of(datetime).to_string();
        if !self.schedules.remove_slot(datetime) {
            return slot_not_found(key);
        }
        let time = parse_slot_datetime(datetime)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| datetime.to_string());
        self.with_date(&key, |day| {
            self.view_day(day, Some(format!("❌ Слот {} удалён", time)))
        })
    }

    fn clear_day(&self, day: NaiveDate) -> BotReply {
        let count = self.schedules.clear_day(&date_key(day));
        BotReply::text(format!(
            "🗑 {}: удалено слотов: {}",
            format_day(day),
            count
        ))
        .with_keyboard(vec![vec![Button::new("⬅️ К списку дней", AdminAction::ListDays)]])
    }

    fn add_hours_menu(&self, day: NaiveDate) -> BotReply {
        let key = date_key(day);
        let existing = self.schedules.slots_for_date(&key);
        let missing: Vec<u32> = (0..24)
            .filter(|hour| {
                let datetime = hour_datetime(&key, *hour);
                !existing.iter().any(|s| s.datetime == datetime)
            })
            .collect();

        let mut keyboard: Vec<Vec<Button>> = missing
            .chunks(6)
            .map(|row| {
                row.iter()
                    .map(|hour| {
                        Button::new(
                            format!("{:02}:00", hour),
                            AdminAction::AddHour(key.clone(), *hour),
                        )
                    })
                    .collect()
            })
            .collect();
        if let (Some(first), Some(last)) = (
            self.settings.standard_hours.iter().min(),
            self.settings.standard_hours.iter().max(),
        ) {
            keyboard.push(vec![Button::new(
                format!("⭐ Стандартные часы {}:00–{}:00", first, last + 1),
                AdminAction::AddStandardHours(key.clone()),
            )]);
        }
        keyboard.push(vec![Button::new("⬅️ Назад", AdminAction::ViewDay(key))]);

        BotReply::text(format!("➕ {}: какие часы добавить?", format_day(day))).with_keyboard(keyboard)
    }

    fn add_hours(&self, day: NaiveDate, hours: &[u32]) -> BotReply {
        let added = self.schedules.add_missing_hours(&date_key(day), hours);
        self.view_day(day, Some(format!("✅ Добавлено слотов: {}", added.len())))
    }
}

fn access_denied() -> BotReply {
    BotReply::text("⛔ У вас нет доступа.")
}

fn slot_not_found(date_key: String) -> BotReply {
    BotReply::text("Слот не найден.").with_keyboard(vec![vec![Button::new(
        "⬅️ Назад",
        AdminAction::ViewDay(date_key),
    )]])
}

fn day_buttons(days: &[String]) -> Vec<Vec<Button>> {
    days.chunks(3)
        .map(|row| {
            row.iter()
                .map(|key| Button::new(format_date_key(key), AdminAction::ViewDay(key.clone())))
                .collect()
        })
        .collect()
}

fn count_status(slots: &[TimeSlot], status: SlotStatus) -> usize {
    slots.iter().filter(|s| s.status == status).count()
}

fn status_icon(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Available => "🟢",
        SlotStatus::Booked => "🔴",
        SlotStatus::Blocked => "⛔",
    }
}

fn status_label(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Available => "свободно",
        SlotStatus::Booked => "забронировано",
        SlotStatus::Blocked => "заблокировано",
    }
}

fn slot_time(slot: &TimeSlot) -> String {
    parse_slot_datetime(&slot.datetime)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| slot.datetime.clone())
}

fn slot_line(slot: &TimeSlot) -> String {
    let mut line = format!(
        "{} {} — {}",
        status_icon(slot.status),
        slot_time(slot),
        status_label(slot.status)
    );
    if slot.duration != 1 {
        line.push_str(&format!(", {} ч", slot.duration));
    }
    if let Some(note) = &slot.note {
        line.push_str(&format!(" ({})", note));
    }
    line
}
