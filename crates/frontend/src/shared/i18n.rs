//! Arabic/English key lookup
//!
//! Locale preference is persisted in localStorage. Unknown keys are returned
//! unchanged so a missing translation shows up as its key.

use forms::Translate;
use leptos::prelude::*;
use web_sys::window;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Text direction for the `dir` attribute
    pub fn dir(&self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::En => "ltr",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "en" => Locale::En,
            _ => Locale::Ar,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Locale::Ar => Locale::En,
            Locale::En => Locale::Ar,
        }
    }
}

const LOCALE_STORAGE_KEY: &str = "hafez_locale";

const AR: &[(&str, &str)] = &[
    ("app.title", "حافظ - لوحة التحكم"),
    ("app.language", "English"),
    ("entities.mosque", "مسجد"),
    ("entities.charity", "جمعية"),
    ("entities.student", "طالب"),
    ("entities.file", "ملف"),
    ("fields.name", "الاسم"),
    ("fields.email", "البريد الإلكتروني"),
    ("fields.birth_date", "تاريخ الميلاد"),
    ("fields.gender", "الجنس"),
    ("fields.city", "المدينة"),
    ("fields.district", "الحي"),
    ("fields.association", "الجمعية"),
    ("fields.mosque", "المسجد"),
    ("fields.image", "الصورة"),
    ("fields.logo", "الشعار"),
    ("fields.title", "العنوان"),
    ("fields.category", "التصنيف"),
    ("fields.attachment", "المرفق"),
    ("options.male", "ذكر"),
    ("options.female", "أنثى"),
    ("options.curriculum", "منهج"),
    ("options.report", "تقرير"),
    ("options.other", "أخرى"),
    ("form.create", "إضافة"),
    ("form.edit", "تعديل"),
    ("form.save", "حفظ"),
    ("form.cancel", "إلغاء"),
    ("form.choose", "اختر..."),
    ("form.loading", "جار التحميل..."),
    ("form.record_id", "رقم السجل"),
    ("form.current_file", "الملف الحالي"),
    ("validation.required", "حقل {field} مطلوب"),
    ("validation.email", "حقل {field} يجب أن يكون بريدًا إلكترونيًا صحيحًا"),
    ("validation.date", "حقل {field} يجب أن يكون تاريخًا صحيحًا"),
    ("validation.option", "القيمة المختارة في حقل {field} غير صالحة"),
    ("notifications.saved", "تم الحفظ بنجاح"),
    ("notifications.save_failed", "تعذر الحفظ"),
    ("notifications.validation_failed", "يرجى تصحيح الأخطاء في النموذج"),
    ("notifications.options_failed", "تعذر تحميل خيارات {field}"),
    ("notifications.upload_failed", "تعذر رفع الملف"),
    ("notifications.load_failed", "تعذر تحميل السجل"),
];

const EN: &[(&str, &str)] = &[
    ("app.title", "Hafez - Dashboard"),
    ("app.language", "العربية"),
    ("entities.mosque", "Mosque"),
    ("entities.charity", "Charity"),
    ("entities.student", "Student"),
    ("entities.file", "File"),
    ("fields.name", "Name"),
    ("fields.email", "Email"),
    ("fields.birth_date", "Birth date"),
    ("fields.gender", "Gender"),
    ("fields.city", "City"),
    ("fields.district", "District"),
    ("fields.association", "Association"),
    ("fields.mosque", "Mosque"),
    ("fields.image", "Image"),
    ("fields.logo", "Logo"),
    ("fields.title", "Title"),
    ("fields.category", "Category"),
    ("fields.attachment", "Attachment"),
    ("options.male", "Male"),
    ("options.female", "Female"),
    ("options.curriculum", "Curriculum"),
    ("options.report", "Report"),
    ("options.other", "Other"),
    ("form.create", "New"),
    ("form.edit", "Edit"),
    ("form.save", "Save"),
    ("form.cancel", "Cancel"),
    ("form.choose", "Choose..."),
    ("form.loading", "Loading..."),
    ("form.record_id", "Record ID"),
    ("form.current_file", "Current file"),
    ("validation.required", "The {field} field is required"),
    ("validation.email", "The {field} field must be a valid email address"),
    ("validation.date", "The {field} field must be a valid date"),
    ("validation.option", "The selected {field} is invalid"),
    ("notifications.saved", "Saved successfully"),
    ("notifications.save_failed", "Could not save"),
    ("notifications.validation_failed", "Please fix the errors in the form"),
    ("notifications.options_failed", "Could not load {field} options"),
    ("notifications.upload_failed", "Could not upload the file"),
    ("notifications.load_failed", "Could not load the record"),
];

/// Pure lookup; falls back to the key itself
pub fn translate(locale: Locale, key: &str) -> String {
    let table = match locale {
        Locale::Ar => AR,
        Locale::En => EN,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Locale stored in localStorage (default Arabic)
pub fn stored_locale() -> Locale {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LOCALE_STORAGE_KEY).ok().flatten())
        .map(|s| Locale::from_str(&s))
        .unwrap_or_default()
}

fn save_locale(locale: Locale) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(LOCALE_STORAGE_KEY, locale.as_str());
    }
}

fn apply_document_direction(locale: Locale) {
    if let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("lang", locale.as_str());
        let _ = root.set_attribute("dir", locale.dir());
    }
}

#[derive(Clone, Copy)]
pub struct I18nContext {
    pub locale: RwSignal<Locale>,
}

impl I18nContext {
    /// Reactive lookup for views
    pub fn t(&self, key: &str) -> String {
        translate(self.locale.get(), key)
    }

    pub fn set_locale(&self, locale: Locale) {
        self.locale.set(locale);
        save_locale(locale);
        apply_document_direction(locale);
    }

    pub fn toggle(&self) {
        self.set_locale(self.locale.get_untracked().toggled());
    }
}

impl Translate for I18nContext {
    fn translate(&self, key: &str) -> String {
        translate(self.locale.get_untracked(), key)
    }
}

/// Provides the i18n context to children components.
#[component]
pub fn I18nProvider(children: Children) -> impl IntoView {
    let initial = stored_locale();
    apply_document_direction(initial);
    provide_context(I18nContext {
        locale: RwSignal::new(initial),
    });
    children()
}

pub fn use_i18n() -> I18nContext {
    use_context::<I18nContext>().expect("I18nContext not found. Wrap your app with I18nProvider.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(translate(Locale::En, "fields.city"), "City");
        assert_eq!(translate(Locale::Ar, "fields.city"), "المدينة");
        assert_eq!(translate(Locale::En, "fields.unknown"), "fields.unknown");
    }

    #[test]
    fn test_tables_cover_the_same_keys() {
        for (key, _) in AR {
            assert!(EN.iter().any(|(k, _)| k == key), "missing en: {key}");
        }
        for (key, _) in EN {
            assert!(AR.iter().any(|(k, _)| k == key), "missing ar: {key}");
        }
    }

    #[test]
    fn test_entity_labels_are_translated() {
        use contracts::domain::common::EntityKind;
        for kind in EntityKind::all() {
            for field in kind.form_fields() {
                assert_ne!(translate(Locale::En, &field.label), field.label);
            }
            assert_ne!(translate(Locale::En, kind.title_key()), kind.title_key());
        }
    }
}
