//! UI strings
//!
//! The article payload is Turkish (`*_tr` fields); the surrounding chrome can
//! be rendered in English or Turkish.

use crate::types::FormError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Tr => &TR,
        }
    }
}

/// Every user-facing label
#[derive(Debug)]
pub struct Strings {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub keyword_label: &'static str,
    pub keyword_placeholder: &'static str,
    pub count_label: &'static str,
    pub years_label: &'static str,
    pub years_placeholder: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub loading: &'static str,
    pub error_heading: &'static str,
    pub fallback_error: &'static str,
    pub results_found: &'static str,
    pub empty_hint: &'static str,
    pub no_results: &'static str,
    pub authors: &'static str,
    pub published: &'static str,
    pub doi: &'static str,
    pub identifier: &'static str,
    pub summary: &'static str,
    pub key_takeaways: &'static str,
    pub show_abstract: &'static str,
    pub hide_abstract: &'static str,
    pub unknown: &'static str,
    pub ready: &'static str,
    pub searching: &'static str,
    pub completed_at: &'static str,
    pub failed: &'static str,
    pub form_title: &'static str,
    pub results_title: &'static str,
    pub shortcut_search: &'static str,
    pub shortcut_next: &'static str,
    pub shortcut_expand: &'static str,
    pub shortcut_quit: &'static str,
    pub shortcut_help: &'static str,
    pub help_title: &'static str,
    pub help_heading: &'static str,
    /// (key, description) rows of the help modal
    pub help_entries: &'static [(&'static str, &'static str)],
    pub help_close: &'static str,
    pub blank_keyword: &'static str,
    /// `{min}` and `{max}` are substituted
    pub count_out_of_range: &'static str,
    /// `{value}` is substituted
    pub years_not_a_number: &'static str,
    /// `{min}` and `{max}` are substituted
    pub years_out_of_range: &'static str,
}

impl Strings {
    pub fn results_banner(&self, count: usize) -> String {
        format!("{} {}", count, self.results_found)
    }

    /// Localized text for a form validation failure
    pub fn form_error(&self, error: &FormError) -> String {
        let range = |template: &str, min: u32, max: u32| {
            template
                .replace("{min}", &min.to_string())
                .replace("{max}", &max.to_string())
        };
        match error {
            FormError::BlankKeyword => self.blank_keyword.to_string(),
            FormError::ArticleCountOutOfRange { min, max } => {
                range(self.count_out_of_range, *min, *max)
            }
            FormError::YearsNotANumber(value) => self.years_not_a_number.replace("{value}", value),
            FormError::YearsOutOfRange { min, max } => range(self.years_out_of_range, *min, *max),
        }
    }
}

pub static EN: Strings = Strings {
    app_title: "MedInsight",
    app_subtitle: "Medical Literature Analysis",
    keyword_label: "Keyword",
    keyword_placeholder: "e.g. diabetic retinopathy treatment",
    count_label: "Articles (1-50)",
    years_label: "Last N years (optional)",
    years_placeholder: "e.g. 5",
    submit: "Search Articles",
    submitting: "Searching...",
    loading: "Analyzing articles, please wait...",
    error_heading: "Error:",
    fallback_error: "An error occurred. Please try again.",
    results_found: "articles found",
    empty_hint: "Use the form above to search for articles.",
    no_results: "No articles matched this search.",
    authors: "Authors",
    published: "Published",
    doi: "DOI",
    identifier: "ID",
    summary: "Summary",
    key_takeaways: "Key Clinical Takeaways",
    show_abstract: "Show full translation",
    hide_abstract: "Hide abstract",
    unknown: "Unknown",
    ready: "Ready",
    searching: "Searching",
    completed_at: "Completed at",
    failed: "Failed",
    form_title: "Search",
    results_title: "Results",
    shortcut_search: "Search",
    shortcut_next: "Next",
    shortcut_expand: "Expand",
    shortcut_quit: "Quit",
    shortcut_help: "Help",
    help_title: "Help",
    help_heading: "Keyboard Shortcuts",
    help_entries: &[
        ("Enter", "Search / toggle selected article"),
        ("Tab", "Next field"),
        ("Shift+Tab", "Previous field"),
        ("↑/↓", "Select article / move between fields"),
        ("PageUp/Down", "Scroll results"),
        ("Space / x", "Expand or collapse the full abstract"),
        ("Esc", "Back to the search form"),
        ("Ctrl+Q", "Quit application"),
        ("Ctrl+C", "Force quit"),
        ("F1", "Show this help"),
    ],
    help_close: "Press any key to close",
    blank_keyword: "Keyword must not be empty",
    count_out_of_range: "Article count must be between {min} and {max}",
    years_not_a_number: "Year range must be a whole number: {value}",
    years_out_of_range: "Year range must be between {min} and {max}",
};

pub static TR: Strings = Strings {
    app_title: "MedInsight",
    app_subtitle: "Tıbbi Literatür Analiz Platformu",
    keyword_label: "Anahtar Kelime",
    keyword_placeholder: "Örn: diabetic retinopathy treatment",
    count_label: "Makale Sayısı (1-50)",
    years_label: "Son N Yıl (Opsiyonel)",
    years_placeholder: "Örn: 5",
    submit: "Makale Ara",
    submitting: "Aranıyor...",
    loading: "Makaleler analiz ediliyor, lütfen bekleyin...",
    error_heading: "Hata:",
    fallback_error: "Bir hata oluştu. Lütfen tekrar deneyin.",
    results_found: "makale bulundu",
    empty_hint: "Makale aramak için yukarıdaki formu kullanın.",
    no_results: "Bu arama için makale bulunamadı.",
    authors: "Yazarlar",
    published: "Yayın Tarihi",
    doi: "DOI",
    identifier: "ID",
    summary: "Özet",
    key_takeaways: "Klinik Önemli Çıkarımlar",
    show_abstract: "Tam Çeviriyi Görüntüle",
    hide_abstract: "Özeti Gizle",
    unknown: "Bilinmiyor",
    ready: "Hazır",
    searching: "Aranıyor",
    completed_at: "Tamamlandı",
    failed: "Başarısız",
    form_title: "Arama",
    results_title: "Sonuçlar",
    shortcut_search: "Ara",
    shortcut_next: "Sonraki",
    shortcut_expand: "Genişlet",
    shortcut_quit: "Çıkış",
    shortcut_help: "Yardım",
    help_title: "Yardım",
    help_heading: "Klavye Kısayolları",
    help_entries: &[
        ("Enter", "Ara / seçili makaleyi aç-kapat"),
        ("Tab", "Sonraki alan"),
        ("Shift+Tab", "Önceki alan"),
        ("↑/↓", "Makale seç / alanlar arasında geç"),
        ("PageUp/Down", "Sonuçları kaydır"),
        ("Space / x", "Tam özeti aç veya kapat"),
        ("Esc", "Arama formuna dön"),
        ("Ctrl+Q", "Uygulamadan çık"),
        ("Ctrl+C", "Zorla çık"),
        ("F1", "Bu yardımı göster"),
    ],
    help_close: "Kapatmak için bir tuşa basın",
    blank_keyword: "Anahtar kelime boş olamaz",
    count_out_of_range: "Makale sayısı {min} ile {max} arasında olmalıdır",
    years_not_a_number: "Yıl aralığı tam sayı olmalıdır: {value}",
    years_out_of_range: "Yıl aralığı {min} ile {max} arasında olmalıdır",
};
