//! Default taxonomy for a fresh install.

use sqlx::SqlitePool;
use tracing::info;

use crate::common::utils::slugify;
use crate::common::DirectoryResult;
use crate::domains::taxonomy::data::SeedSummary;
use crate::domains::taxonomy::models::{Category, Country, Language};

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Adult/18+/Hot",
    "Art/Design/Photography",
    "Auto/Vehicle",
    "Business/Advertising/Marketing",
    "Comedy/Funny",
    "Dating/Flirting/Chatting",
    "Education/School",
    "Entertainment/Masti",
    "Family/Relationships",
    "Fan Club/Celebrities",
    "Fashion/Style/Clothing",
    "Film/Animation",
    "Food/Drinks",
    "Gaming/Apps",
    "Health/Beauty/Fitness",
    "Jobs/Career",
    "Money/Earning",
    "Music/Audio/Songs",
    "News/Magazines/Politics",
    "Pets/Animals/Nature",
    "Roleplay/Comics",
    "Science/Technology",
    "Shopping/Buy/Sell",
    "Social/Friendship/Community",
    "Spiritual/Devotional",
    "Sports/Games",
    "Thoughts/Quotes/Jokes",
    "Travel/Local/Place",
];

pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Algeria", "Argentina", "Australia", "Austria", "Azerbaijan", "Bahrain", "Bangladesh",
    "Belarus", "Belgium", "Bolivia", "Bosnia and Herzegovina", "Brazil", "Bulgaria",
    "Canada", "Chile", "China", "Colombia", "Croatia", "Czechia", "Denmark", "Egypt",
    "Estonia", "Ethiopia", "Finland", "France", "Georgia", "Germany", "Ghana", "Greece",
    "Hong Kong", "Hungary", "Iceland", "India", "Indonesia", "Iraq", "Ireland", "Israel",
    "Italy", "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kuwait", "Latvia",
    "Lebanon", "Libya", "Lithuania", "Luxembourg", "Macedonia", "Malawi", "Malaysia",
    "Mexico", "Montenegro", "Morocco", "Mozambique", "Nepal", "Netherlands", "New Zealand",
    "Nigeria", "Norway", "Oman", "Pakistan", "Panama", "Peru", "Philippines", "Poland",
    "Portugal", "Puerto Rico", "Qatar", "Romania", "Russia", "Saudi Arabia", "Senegal",
    "Serbia", "Singapore", "Slovakia", "Slovenia", "South Africa", "South Korea", "Spain",
    "Sri Lanka", "Sweden", "Switzerland", "Taiwan", "Tanzania", "Thailand", "Togo",
    "Tunisia", "Turkey", "Uganda", "Ukraine", "United Arab Emirates", "United Kingdom",
    "United States", "Venezuela", "Vietnam", "Yemen", "Zimbabwe",
];

pub const DEFAULT_LANGUAGES: &[&str] = &[
    "Afrikaans", "Albanian", "Amharic", "Arabic", "Armenian", "Azerbaijani", "Bangla",
    "Basque", "Belarusian", "Bosnian", "Bulgarian", "Catalan", "Chinese", "Croatian",
    "Czech", "Danish", "Dutch", "English", "Estonian", "Filipino", "Finnish", "French",
    "Galician", "Georgian", "German", "Greek", "Gujarati", "Hebrew", "Hindi", "Hungarian",
    "Icelandic", "Indonesian", "Italian", "Japanese", "Kannada", "Kazakh", "Khmer",
    "Korean", "Kyrgyz", "Lao", "Latvian", "Lithuanian", "Macedonian", "Malay",
    "Malayalam", "Marathi", "Mongolian", "Myanmar", "Nepali", "Norwegian", "Persian",
    "Polish", "Portuguese", "Punjabi", "Romanian", "Russian", "Serbian", "Sinhala",
    "Slovak", "Slovenian", "Spanish", "Swahili", "Swedish", "Tamil", "Telugu", "Thai",
    "Turkish", "Ukrainian", "Urdu", "Uzbek", "Vietnamese", "Zulu",
];

/// Insert the default categories, countries and languages. Names that
/// already exist are left alone, so running it twice is harmless.
pub async fn seed_taxonomy(pool: &SqlitePool) -> DirectoryResult<SeedSummary> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for name in DEFAULT_CATEGORIES {
        if Category::insert_if_missing(name, &slugify(name), &mut tx).await? {
            summary.categories_created += 1;
        }
    }
    for name in DEFAULT_COUNTRIES {
        if Country::insert_if_missing(name, &slugify(name), &mut tx).await? {
            summary.countries_created += 1;
        }
    }
    for name in DEFAULT_LANGUAGES {
        if Language::insert_if_missing(name, &slugify(name), &mut tx).await? {
            summary.languages_created += 1;
        }
    }

    tx.commit().await?;

    info!(
        categories = summary.categories_created,
        countries = summary.countries_created,
        languages = summary.languages_created,
        "Seeded taxonomy"
    );
    Ok(summary)
}
