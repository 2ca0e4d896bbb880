//! User-facing prompt text for every dialogue step.
//!
//! Kept in one place so the engine's transition logic stays free of string
//! assembly. All text is addressed to the end user and is intentionally in
//! the conversational register of the chat assistant.

use chrono::NaiveDate;

use crate::domain::catalog::{CountryCatalog, DepartureCatalog, TripLength};

use super::state::ParamsDraft;

pub(super) fn greeting(departures: &DepartureCatalog) -> String {
    format!(
        "👋 Привет! Я помогу вам найти идеальный тур.\n\n{}",
        departure_question(departures)
    )
}

pub(super) fn departure_question(departures: &DepartureCatalog) -> String {
    let options: Vec<String> = departures
        .iter()
        .map(|(id, name)| format!("{}: {}", id.as_str(), name))
        .collect();
    format!(
        "✈️ Откуда вы хотите вылететь?\n{}\n\nВведите номер города:",
        options.join("\n")
    )
}

pub(super) fn departure_retry(departures: &DepartureCatalog) -> String {
    format!(
        "Пожалуйста, выберите город из списка.\n\n{}",
        departure_question(departures)
    )
}

pub(super) fn country_question(catalog: &CountryCatalog) -> String {
    format!(
        "🌍 В какую страну хотите поехать?\nНапример: {}\n\nВведите название страны:",
        catalog.display_names().join(", ")
    )
}

pub(super) fn country_retry(catalog: &CountryCatalog) -> String {
    format!(
        "К сожалению, я не узнал такую страну. {}",
        country_question(catalog)
    )
}

pub(super) fn country_disambiguation(display_name: &str) -> String {
    format!("🤔 Вы имели в виду {}? (да/нет)", display_name)
}

pub(super) fn trip_length_question() -> String {
    let options: Vec<String> = TripLength::ALL
        .iter()
        .map(|p| format!("{}: {}", p.option(), p.label()))
        .collect();
    format!(
        "⌛ Какой длительности тур вы предпочитаете?\n{}\n\nВведите номер варианта:",
        options.join("\n")
    )
}

pub(super) fn trip_length_retry() -> String {
    format!(
        "Пожалуйста, выберите длительность из списка.\n\n{}",
        trip_length_question()
    )
}

pub(super) fn adults_question() -> String {
    "👥 Сколько взрослых поедет? (введите число от 1 до 6):".to_string()
}

pub(super) fn adults_retry() -> String {
    format!("Количество взрослых должно быть от 1 до 6.\n{}", adults_question())
}

pub(super) fn children_question() -> String {
    "👶 Сколько детей поедет? (введите число от 0 до 4):".to_string()
}

pub(super) fn children_retry() -> String {
    format!("Количество детей должно быть от 0 до 4.\n{}", children_question())
}

pub(super) fn confirmation(
    draft: &ParamsDraft,
    departures: &DepartureCatalog,
    catalog: &CountryCatalog,
    window: (NaiveDate, NaiveDate),
) -> String {
    let departure_name = departures
        .display_name(&draft.departure)
        .unwrap_or(draft.departure.as_str());
    let country_name = catalog
        .display_name(&draft.country)
        .unwrap_or(draft.country.as_str());
    let (nights_from, nights_to) = draft.trip_length.nights();
    let (date_from, date_to) = window;

    format!(
        "🎉 Отлично! Проверьте данные для поиска тура:\n\n\
         ✈️ Вылет из: {}\n\
         🌍 Страна: {}\n\
         📅 Примерные даты: {} - {}\n\
         🌙 Ночей: {}-{}\n\
         👥 Взрослых: {}\n\
         👶 Детей: {}\n\n\
         Начать поиск туров? (да/нет)",
        departure_name,
        country_name,
        date_from.format("%d.%m.%Y"),
        date_to.format("%d.%m.%Y"),
        nights_from,
        nights_to,
        draft.adults,
        draft.children
    )
}

pub(super) fn yes_no_retry() -> String {
    "Пожалуйста, ответьте 'да' или 'нет':".to_string()
}

pub(super) fn restart(departures: &DepartureCatalog) -> String {
    format!(
        "Хорошо, давайте начнем сначала.\n\n{}",
        departure_question(departures)
    )
}

pub(super) fn search_in_progress() -> String {
    "🔍 Поиск уже выполняется, пожалуйста, подождите.".to_string()
}
