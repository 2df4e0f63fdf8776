//! Placeholder tokens backed by realistic-value producers.
//!
//! Tokens appear inside gen columns as `${token}`. Each maps to a producer
//! over the `fake` crate (or the run RNG for plain scalars) and yields a
//! typed cell value so output formats still apply.

use chrono::NaiveDate;
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryCode, CountryName, Latitude, Longitude, PostCode, StateAbbr,
    StateName, StreetName, ZipCode,
};
use fake::faker::company::en::{Buzzword, CompanyName, CompanySuffix, Industry, Profession};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::currency::en::{CurrencyCode, CurrencyName, CurrencySymbol};
use fake::faker::internet::en::{
    DomainSuffix, IPv4, IPv6, MACAddress, Password, SafeEmail, UserAgent, Username,
};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::{CellNumber, PhoneNumber};
use fake::Fake;
use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;
use regex::Regex;

use tablesmith_core::CellValue;

/// Every token the catalog resolves, used for validation and docs.
pub const TOKENS: &[&str] = &[
    "first_name",
    "last_name",
    "name",
    "email",
    "username",
    "password",
    "phone",
    "cell_phone",
    "street",
    "building_number",
    "city",
    "state",
    "state_abbr",
    "zip",
    "post_code",
    "country",
    "country_code",
    "latitude",
    "longitude",
    "company",
    "company_suffix",
    "industry",
    "profession",
    "buzzword",
    "job_title",
    "word",
    "sentence",
    "paragraph",
    "ipv4",
    "ipv6",
    "mac_address",
    "user_agent",
    "domain_suffix",
    "credit_card",
    "currency_code",
    "currency_name",
    "currency_symbol",
    "uuid",
    "bool",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint8",
    "uint16",
    "uint32",
    "float32",
    "float64",
    "date",
    "time",
    "timestamp",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "digit",
];

/// Distinct placeholder tokens occurring in a template string, in order.
pub fn placeholder_tokens(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let Ok(regex) = Regex::new(r"\$\{([A-Za-z0-9_]+)\}") else {
        return tokens;
    };
    for capture in regex.captures_iter(value) {
        let token = capture[1].to_string();
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// When the whole string is exactly one placeholder, its token.
pub fn single_token(value: &str) -> Option<&str> {
    let stripped = value.strip_prefix("${")?.strip_suffix('}')?;
    if stripped.contains('$') || stripped.contains('{') || stripped.contains('}') {
        return None;
    }
    Some(stripped)
}

/// Produce one value for a token, or `None` for an unknown token.
pub fn produce(token: &str, rng: &mut ChaCha8Rng) -> Option<CellValue> {
    let value = match token {
        "first_name" => text(FirstName().fake_with_rng::<String, _>(rng)),
        "last_name" => text(LastName().fake_with_rng::<String, _>(rng)),
        "name" => text(Name().fake_with_rng::<String, _>(rng)),
        "email" => text(SafeEmail().fake_with_rng::<String, _>(rng)),
        "username" => text(Username().fake_with_rng::<String, _>(rng)),
        "password" => text(Password(8..16).fake_with_rng::<String, _>(rng)),
        "phone" => text(PhoneNumber().fake_with_rng::<String, _>(rng)),
        "cell_phone" => text(CellNumber().fake_with_rng::<String, _>(rng)),
        "street" => text(StreetName().fake_with_rng::<String, _>(rng)),
        "building_number" => text(BuildingNumber().fake_with_rng::<String, _>(rng)),
        "city" => text(CityName().fake_with_rng::<String, _>(rng)),
        "state" => text(StateName().fake_with_rng::<String, _>(rng)),
        "state_abbr" => text(StateAbbr().fake_with_rng::<String, _>(rng)),
        "zip" => text(ZipCode().fake_with_rng::<String, _>(rng)),
        "post_code" => text(PostCode().fake_with_rng::<String, _>(rng)),
        "country" => text(CountryName().fake_with_rng::<String, _>(rng)),
        "country_code" => text(CountryCode().fake_with_rng::<String, _>(rng)),
        "latitude" => CellValue::Float(Latitude().fake_with_rng::<f64, _>(rng)),
        "longitude" => CellValue::Float(Longitude().fake_with_rng::<f64, _>(rng)),
        "company" => text(CompanyName().fake_with_rng::<String, _>(rng)),
        "company_suffix" => text(CompanySuffix().fake_with_rng::<String, _>(rng)),
        "industry" => text(Industry().fake_with_rng::<String, _>(rng)),
        "profession" => text(Profession().fake_with_rng::<String, _>(rng)),
        "buzzword" => text(Buzzword().fake_with_rng::<String, _>(rng)),
        "job_title" => text(JobTitle().fake_with_rng::<String, _>(rng)),
        "word" => text(Word().fake_with_rng::<String, _>(rng)),
        "sentence" => text(Sentence(3..8).fake_with_rng::<String, _>(rng)),
        "paragraph" => text(Paragraph(1..4).fake_with_rng::<String, _>(rng)),
        "ipv4" => text(IPv4().fake_with_rng::<String, _>(rng)),
        "ipv6" => text(IPv6().fake_with_rng::<String, _>(rng)),
        "mac_address" => text(MACAddress().fake_with_rng::<String, _>(rng)),
        "user_agent" => text(UserAgent().fake_with_rng::<String, _>(rng)),
        "domain_suffix" => text(DomainSuffix().fake_with_rng::<String, _>(rng)),
        "credit_card" => text(CreditCardNumber().fake_with_rng::<String, _>(rng)),
        "currency_code" => text(CurrencyCode().fake_with_rng::<String, _>(rng)),
        "currency_name" => text(CurrencyName().fake_with_rng::<String, _>(rng)),
        "currency_symbol" => text(CurrencySymbol().fake_with_rng::<String, _>(rng)),
        "uuid" => text(random_uuid(rng)),
        "bool" => CellValue::Bool(rng.random_bool(0.5)),
        "int8" => CellValue::Int(rng.random_range(i8::MIN as i64..=i8::MAX as i64)),
        "int16" => CellValue::Int(rng.random_range(i16::MIN as i64..=i16::MAX as i64)),
        "int32" => CellValue::Int(rng.random_range(i32::MIN as i64..=i32::MAX as i64)),
        "int64" => CellValue::Int(rng.random::<i64>()),
        "uint8" => CellValue::Int(rng.random_range(0..=u8::MAX as i64)),
        "uint16" => CellValue::Int(rng.random_range(0..=u16::MAX as i64)),
        "uint32" => CellValue::Int(rng.random_range(0..=u32::MAX as i64)),
        "float32" => CellValue::Float(rng.random_range(0.0..=10_000.0_f32) as f64),
        "float64" => CellValue::Float(rng.random_range(0.0..=10_000.0_f64)),
        "date" => CellValue::Date(random_date(rng)),
        "time" => text(format!(
            "{:02}:{:02}:{:02}",
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60)
        )),
        "timestamp" => {
            let date = random_date(rng);
            let seconds = rng.random_range(0..86_400);
            let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                .unwrap_or_default();
            CellValue::DateTime(date.and_time(time))
        }
        "year" => CellValue::Int(rng.random_range(1950..=2030)),
        "month" => CellValue::Int(rng.random_range(1..=12)),
        "day" => CellValue::Int(rng.random_range(1..=28)),
        "hour" => CellValue::Int(rng.random_range(0..=23)),
        "minute" => CellValue::Int(rng.random_range(0..=59)),
        "second" => CellValue::Int(rng.random_range(0..=59)),
        "digit" => CellValue::Int(rng.random_range(0..=9)),
        _ => return None,
    };
    Some(value)
}

fn text(value: String) -> CellValue {
    CellValue::Str(value)
}

fn random_date(rng: &mut ChaCha8Rng) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    base + chrono::Duration::days(rng.random_range(0..=365 * 30))
}

fn random_uuid(rng: &mut ChaCha8Rng) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

/// Template environment for whole-value templates, with the most common
/// producers exposed as functions. Template functions draw from the process
/// RNG, so template columns are not seed-deterministic.
pub fn template_environment() -> minijinja::Environment<'static> {
    let mut env = minijinja::Environment::new();
    env.add_function("first_name", || FirstName().fake::<String>());
    env.add_function("last_name", || LastName().fake::<String>());
    env.add_function("name", || Name().fake::<String>());
    env.add_function("email", || SafeEmail().fake::<String>());
    env.add_function("username", || Username().fake::<String>());
    env.add_function("company", || CompanyName().fake::<String>());
    env.add_function("city", || CityName().fake::<String>());
    env.add_function("phone", || PhoneNumber().fake::<String>());
    env.add_function("job_title", || JobTitle().fake::<String>());
    env.add_function("word", || Word().fake::<String>());
    env.add_function("sentence", || Sentence(3..8).fake::<String>());
    env.add_function("paragraph", || Paragraph(1..4).fake::<String>());
    env
}
