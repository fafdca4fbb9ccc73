//! Month tables and constellation name translations
//!
//! Each language supplies exactly twelve months, January first, with their
//! lengths in the reference year 2014, plus translations for constellation
//! names. Untranslated names fall back to the catalog name.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{PlanisphereError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Month {
    /// Number of days in the 2014 month
    pub days: u32,
    pub name: String,
}

impl Month {
    pub fn new(days: u32, name: impl Into<String>) -> Self {
        Self {
            days,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageTable {
    pub months: Vec<Month>,
    #[serde(default)]
    pub constellation_translations: HashMap<String, String>,
}

const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn months(names: [&str; 12]) -> Vec<Month> {
    MONTH_DAYS
        .iter()
        .zip(names)
        .map(|(&days, name)| Month::new(days, name))
        .collect()
}

fn translations(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

impl LanguageTable {
    /// Display name for a constellation, or the catalog name unchanged
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.constellation_translations
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    pub fn english() -> Self {
        Self {
            months: months([
                "JANUARY",
                "FEBRUARY",
                "MARCH",
                "APRIL",
                "MAY",
                "JUNE",
                "JULY",
                "AUGUST",
                "SEPTEMBER",
                "OCTOBER",
                "NOVEMBER",
                "DECEMBER",
            ]),
            constellation_translations: HashMap::new(),
        }
    }

    pub fn french() -> Self {
        Self {
            months: months([
                "JANVIER",
                "FÉVRIER",
                "MARS",
                "AVRIL",
                "MAI",
                "JUIN",
                "JUILLET",
                "AOÛT",
                "SEPTEMBRE",
                "OCTOBRE",
                "NOVEMBRE",
                "DÉCEMBRE",
            ]),
            constellation_translations: translations(&[
                ("Andromeda", "Andromède"),
                ("Aquarius", "Verseau"),
                ("Aquila", "Aigle"),
                ("Aries", "Bélier"),
                ("Auriga", "Cocher"),
                ("Bootes", "Bouvier"),
                ("Cancer", "Cancer"),
                ("Canis_Major", "Grand_Chien"),
                ("Canis_Minor", "Petit_Chien"),
                ("Capricornus", "Capricorne"),
                ("Cassiopeia", "Cassiopée"),
                ("Centaurus", "Centaure"),
                ("Cepheus", "Céphée"),
                ("Cetus", "Baleine"),
                ("Corona_Borealis", "Couronne_Boréale"),
                ("Crux", "Croix_du_Sud"),
                ("Cygnus", "Cygne"),
                ("Draco", "Dragon"),
                ("Gemini", "Gémeaux"),
                ("Hercules", "Hercule"),
                ("Leo", "Lion"),
                ("Libra", "Balance"),
                ("Lyra", "Lyre"),
                ("Orion", "Orion"),
                ("Pegasus", "Pégase"),
                ("Perseus", "Persée"),
                ("Pisces", "Poissons"),
                ("Sagittarius", "Sagittaire"),
                ("Scorpius", "Scorpion"),
                ("Taurus", "Taureau"),
                ("Ursa_Major", "Grande_Ourse"),
                ("Ursa_Minor", "Petite_Ourse"),
                ("Virgo", "Vierge"),
            ]),
        }
    }

    pub fn chinese() -> Self {
        Self {
            months: months([
                "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月",
                "十一月", "十二月",
            ]),
            constellation_translations: translations(&[
                ("Andromeda", "仙女座"),
                ("Aquarius", "宝瓶座"),
                ("Aquila", "天鹰座"),
                ("Aries", "白羊座"),
                ("Auriga", "御夫座"),
                ("Bootes", "牧夫座"),
                ("Cancer", "巨蟹座"),
                ("Canis_Major", "大犬座"),
                ("Canis_Minor", "小犬座"),
                ("Capricornus", "摩羯座"),
                ("Cassiopeia", "仙后座"),
                ("Centaurus", "半人马座"),
                ("Cepheus", "仙王座"),
                ("Cetus", "鲸鱼座"),
                ("Corona_Borealis", "北冕座"),
                ("Crux", "南十字座"),
                ("Cygnus", "天鹅座"),
                ("Draco", "天龙座"),
                ("Gemini", "双子座"),
                ("Hercules", "武仙座"),
                ("Leo", "狮子座"),
                ("Libra", "天秤座"),
                ("Lyra", "天琴座"),
                ("Orion", "猎户座"),
                ("Pegasus", "飞马座"),
                ("Perseus", "英仙座"),
                ("Pisces", "双鱼座"),
                ("Sagittarius", "人马座"),
                ("Scorpius", "天蝎座"),
                ("Taurus", "金牛座"),
                ("Ursa_Major", "大熊座"),
                ("Ursa_Minor", "小熊座"),
                ("Virgo", "室女座"),
            ]),
        }
    }

    fn validate(&self, code: &str) -> Result<()> {
        if self.months.len() != 12 {
            return Err(PlanisphereError::invalid_table(
                code,
                format!("expected 12 months, found {}", self.months.len()),
            ));
        }
        // Day angles are taken from 2014 dates, so every month must match it
        let mismatch = self
            .months
            .iter()
            .zip(MONTH_DAYS)
            .find(|(month, days)| month.days != *days);
        if let Some((month, days)) = mismatch {
            return Err(PlanisphereError::invalid_table(
                code,
                format!(
                    "month '{}' has {} days, expected {}",
                    month.name, month.days, days
                ),
            ));
        }
        Ok(())
    }
}

/// Language tables available by code
#[derive(Debug, Clone)]
pub struct LanguageSet {
    languages: BTreeMap<String, LanguageTable>,
}

impl Default for LanguageSet {
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("en".to_string(), LanguageTable::english());
        languages.insert("fr".to_string(), LanguageTable::french());
        languages.insert("zh".to_string(), LanguageTable::chinese());
        Self { languages }
    }
}

impl LanguageSet {
    pub fn get(&self, code: &str) -> Result<&LanguageTable> {
        self.languages
            .get(code)
            .ok_or_else(|| PlanisphereError::UnknownLanguage(code.to_string()))
    }

    /// Register a language table, replacing any table with the same code
    pub fn insert(&mut self, code: impl Into<String>, table: LanguageTable) -> Result<()> {
        let code = code.into();
        table.validate(&code)?;
        self.languages.insert(code, table);
        Ok(())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_languages_are_valid() {
        let languages = LanguageSet::default();
        assert_eq!(languages.codes().collect::<Vec<_>>(), vec!["en", "fr", "zh"]);
        for code in ["en", "fr", "zh"] {
            let table = languages.get(code).unwrap();
            table.validate(code).unwrap();
            assert_eq!(table.months.iter().map(|m| m.days).sum::<u32>(), 365);
        }
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            LanguageSet::default().get("de"),
            Err(PlanisphereError::UnknownLanguage(code)) if code == "de"
        ));
    }

    #[test]
    fn test_translate() {
        let languages = LanguageSet::default();
        let fr = languages.get("fr").unwrap();
        assert_eq!(fr.translate("Ursa_Major"), "Grande_Ourse");
        assert_eq!(fr.translate("Lupus"), "Lupus");
        assert_eq!(languages.get("en").unwrap().translate("Orion"), "Orion");
        assert_eq!(languages.get("zh").unwrap().translate("Orion"), "猎户座");
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let mut languages = LanguageSet::default();

        let mut short = LanguageTable::english();
        short.months.pop();
        assert!(matches!(
            languages.insert("xx", short),
            Err(PlanisphereError::InvalidTable { .. })
        ));

        let mut long_month = LanguageTable::english();
        long_month.months[1].days = 32;
        assert!(languages.insert("xx", long_month).is_err());
        assert!(languages.get("xx").is_err());
    }

    #[test]
    fn test_month_lengths_must_match_2014() {
        let mut languages = LanguageSet::default();

        let mut leap = LanguageTable::english();
        leap.months[1].days = 29;
        assert!(matches!(
            languages.insert("xx", leap),
            Err(PlanisphereError::InvalidTable { message, .. }) if message.contains("expected 28")
        ));

        // Plausible lengths in the wrong months are still rejected
        let mut swapped = LanguageTable::english();
        swapped.months[3].days = 31;
        swapped.months[4].days = 30;
        assert!(languages.insert("xx", swapped).is_err());
        assert!(languages.get("xx").is_err());
    }

    #[test]
    fn test_language_from_toml() {
        let mut text = String::from("months = [\n");
        for (i, days) in MONTH_DAYS.iter().enumerate() {
            text.push_str(&format!("  {{ days = {}, name = \"M{}\" }},\n", days, i + 1));
        }
        text.push_str("]\n[constellation_translations]\nOrion = \"Orion_X\"\n");

        let table: LanguageTable = toml::from_str(&text).unwrap();
        assert_eq!(table.months[11].name, "M12");
        assert_eq!(table.translate("Orion"), "Orion_X");

        let mut languages = LanguageSet::default();
        languages.insert("xx", table).unwrap();
        assert!(languages.get("xx").is_ok());
    }
}
