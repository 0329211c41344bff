//! Presenter: maps a domain outcome to a display payload.
//!
//! A pure function with no I/O. Captions are HTML (the attribution line
//! links to the photographer's profile); keyboards are rows of button
//! labels. `keyboard: None` means the previously shown keyboard stays up.

use serde::{Deserialize, Serialize};

use super::input::labels;
use super::outcome::{FailureKeyboard, FailureKind, Outcome, PhotoContext, RePromptMenu};
use crate::domain::catalog::Photo;

/// Referral tag attached to attribution links, per provider usage terms.
const APP_NAME: &str = "SplashBot";

/// What gets sent back to the chat: text (or a photo with caption) plus an
/// optional reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    /// Message text, or photo caption when `photo_url` is set. HTML markup.
    pub text: String,
    /// Photo to send, when the outcome carries one.
    pub photo_url: Option<String>,
    /// Button rows; `None` keeps the keyboard already on screen.
    pub keyboard: Option<Vec<Vec<String>>>,
}

/// Renders a domain outcome into a display payload.
pub fn present(outcome: &Outcome) -> DisplayPayload {
    match outcome {
        Outcome::Welcome => DisplayPayload {
            text: "Добро пожаловать! Выберите действие:".to_string(),
            photo_url: None,
            keyboard: Some(main_menu_keyboard()),
        },
        Outcome::MainMenu => DisplayPayload {
            text: "Выберите действие:".to_string(),
            photo_url: None,
            keyboard: Some(main_menu_keyboard()),
        },
        Outcome::DialogReset => DisplayPayload {
            text: "Диалог завершен. Выберите действие:".to_string(),
            photo_url: None,
            keyboard: Some(main_menu_keyboard()),
        },
        Outcome::RePrompt(menu) => DisplayPayload {
            text: match menu {
                RePromptMenu::Actions => "Пожалуйста, выберите действие из меню.".to_string(),
                RePromptMenu::Collections => {
                    "Пожалуйста, выберите коллекцию или действие из меню.".to_string()
                }
                RePromptMenu::SearchKeywords => {
                    "Введите ключевые слова для поиска:".to_string()
                }
            },
            photo_url: None,
            keyboard: None,
        },
        Outcome::SearchPrompt => DisplayPayload {
            text: "Введите ключевые слова для поиска:".to_string(),
            photo_url: None,
            keyboard: Some(back_keyboard()),
        },
        Outcome::Photo { photo, context } => present_photo(photo, context),
        Outcome::NoSearchResults => DisplayPayload {
            text: "Фото не найдены.".to_string(),
            photo_url: None,
            keyboard: Some(back_keyboard()),
        },
        Outcome::NoCollectionPhotos => DisplayPayload {
            text: "Фото в коллекции не найдены.".to_string(),
            photo_url: None,
            keyboard: Some(back_keyboard()),
        },
        Outcome::Collections {
            titles,
            page,
            has_previous,
        } => DisplayPayload {
            text: format!("Выберите коллекцию (страница {page}):"),
            photo_url: None,
            keyboard: Some(collections_keyboard(titles, *has_previous)),
        },
        Outcome::NoCollections { has_previous } => {
            let mut rows = Vec::new();
            if *has_previous {
                rows.push(vec![labels::PREVIOUS_COLLECTIONS.to_string()]);
            }
            rows.push(vec![labels::BACK.to_string()]);
            DisplayPayload {
                text: "Коллекции не найдены.".to_string(),
                photo_url: None,
                keyboard: Some(rows),
            }
        }
        Outcome::Failure {
            message,
            kind,
            keyboard,
        } => DisplayPayload {
            text: match kind {
                FailureKind::Generic => format!("Ошибка: {message}"),
                FailureKind::CollectionsListing => {
                    format!("Ошибка при загрузке коллекций: {message}")
                }
            },
            photo_url: None,
            keyboard: Some(match keyboard {
                FailureKeyboard::MainMenu => main_menu_keyboard(),
                FailureKeyboard::RandomPhoto => random_photo_keyboard(),
                FailureKeyboard::BackOnly => back_keyboard(),
            }),
        },
    }
}

fn present_photo(photo: &Photo, context: &PhotoContext) -> DisplayPayload {
    let attribution = attribution_line(photo);
    let (text, keyboard) = match context {
        PhotoContext::Random => (attribution, random_photo_keyboard()),
        PhotoContext::Search { page, total_pages } => (
            format!("{attribution}\nСтраница {page} из {total_pages}"),
            pagination_keyboard(*page, *total_pages),
        ),
        PhotoContext::Collection {
            title,
            page,
            total_pages,
        } => (
            format!("Коллекция: {title}\n{attribution}\nСтраница {page} из {total_pages}"),
            pagination_keyboard(*page, *total_pages),
        ),
    };
    DisplayPayload {
        text,
        photo_url: Some(photo.display_url.clone()),
        keyboard: Some(keyboard),
    }
}

/// Attribution line required by the provider's usage terms, with referral
/// tracking parameters on the profile link.
fn attribution_line(photo: &Photo) -> String {
    format!(
        "Фото от <a href='{}?utm_source={}&utm_medium=referral'>{}</a> на Unsplash",
        photo.author_profile_url, APP_NAME, photo.author_name
    )
}

fn main_menu_keyboard() -> Vec<Vec<String>> {
    vec![
        vec![labels::RANDOM_PHOTO.to_string()],
        vec![labels::SEARCH.to_string()],
        vec![labels::COLLECTIONS.to_string()],
    ]
}

fn random_photo_keyboard() -> Vec<Vec<String>> {
    vec![
        vec![labels::MORE_PHOTOS.to_string()],
        vec![labels::BACK.to_string()],
    ]
}

fn back_keyboard() -> Vec<Vec<String>> {
    vec![vec![labels::BACK.to_string()]]
}

/// Photo pagination rows with out-of-range buttons suppressed.
fn pagination_keyboard(page: u32, total_pages: u32) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    if page > 1 {
        rows.push(vec![labels::PREVIOUS_PHOTO.to_string()]);
    }
    if page < total_pages {
        rows.push(vec![labels::NEXT_PHOTO.to_string()]);
    }
    rows.push(vec![labels::BACK.to_string()]);
    rows
}

/// Collection titles, one per row, followed by a navigation row.
fn collections_keyboard(titles: &[String], has_previous: bool) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = titles.iter().map(|t| vec![t.clone()]).collect();
    let mut navigation = Vec::new();
    if has_previous {
        navigation.push(labels::PREVIOUS_COLLECTIONS.to_string());
    }
    navigation.push(labels::NEXT_COLLECTIONS.to_string());
    navigation.push(labels::BACK.to_string());
    rows.push(navigation);
    rows
}
