//! Keyword fragments that identify each target field in a header.
//!
//! Fragments are lowercase. Parent fields come first so that a qualified
//! header such as "Elternteil 1 Vorname" is weighed against the parent
//! keywords before the generic child keyword "vorname"; the longest match
//! decides either way, and the earlier field wins a tie.

use kita_model::FieldKey;

pub type KeywordTable = &'static [(FieldKey, &'static [&'static str])];

pub const FIELD_KEYWORDS: KeywordTable = &[
    (
        FieldKey::Parent1FirstName,
        &[
            "elternteil 1 vorname",
            "elternteil1 vorname",
            "eltern 1 vorname",
            "mutter vorname",
            "vorname mutter",
            "parent 1 first name",
            "parent1 first name",
        ],
    ),
    (
        FieldKey::Parent1LastName,
        &[
            "elternteil 1 nachname",
            "elternteil1 nachname",
            "eltern 1 nachname",
            "elternteil 1 name",
            "mutter nachname",
            "nachname mutter",
            "parent 1 last name",
            "parent1 last name",
        ],
    ),
    (
        FieldKey::Parent1Email,
        &[
            "elternteil 1 e-mail",
            "elternteil 1 email",
            "elternteil1 email",
            "mutter e-mail",
            "mutter email",
            "parent 1 email",
            "e-mail",
            "email",
            "mail",
        ],
    ),
    (
        FieldKey::Parent1Phone,
        &[
            "elternteil 1 telefon",
            "elternteil1 telefon",
            "mutter telefon",
            "parent 1 phone",
            "telefon",
            "handy",
            "mobil",
            "phone",
        ],
    ),
    (
        FieldKey::Parent2FirstName,
        &[
            "elternteil 2 vorname",
            "elternteil2 vorname",
            "eltern 2 vorname",
            "vater vorname",
            "vorname vater",
            "parent 2 first name",
            "parent2 first name",
        ],
    ),
    (
        FieldKey::Parent2LastName,
        &[
            "elternteil 2 nachname",
            "elternteil2 nachname",
            "eltern 2 nachname",
            "elternteil 2 name",
            "vater nachname",
            "nachname vater",
            "parent 2 last name",
            "parent2 last name",
        ],
    ),
    (
        FieldKey::Parent2Email,
        &[
            "elternteil 2 e-mail",
            "elternteil 2 email",
            "elternteil2 email",
            "vater e-mail",
            "vater email",
            "parent 2 email",
        ],
    ),
    (
        FieldKey::Parent2Phone,
        &[
            "elternteil 2 telefon",
            "elternteil2 telefon",
            "vater telefon",
            "parent 2 phone",
        ],
    ),
    (
        FieldKey::MemberNumber,
        &[
            "mitgliedsnummer",
            "mitgliedsnr",
            "mitglied",
            "member",
            "nr",
        ],
    ),
    (
        FieldKey::FirstName,
        &["vorname", "first name", "firstname", "rufname"],
    ),
    (
        FieldKey::LastName,
        &[
            "nachname",
            "familienname",
            "last name",
            "lastname",
            "surname",
            "name",
        ],
    ),
    (
        FieldKey::BirthDate,
        &[
            "geburtsdatum",
            "geburtstag",
            "geboren",
            "birth date",
            "birthdate",
            "birthday",
        ],
    ),
    (
        FieldKey::EntryDate,
        &[
            "eintrittsdatum",
            "eintritt",
            "aufnahmedatum",
            "aufnahme",
            "entry date",
            "entry",
        ],
    ),
    (
        FieldKey::ExitDate,
        &[
            "austrittsdatum",
            "austritt",
            "abmeldung",
            "exit date",
            "exit",
        ],
    ),
    (
        FieldKey::Street,
        &["straße", "strasse", "street", "anschrift", "adresse"],
    ),
    (
        FieldKey::HouseNumber,
        &["hausnummer", "hausnr", "haus-nr", "house number"],
    ),
    (
        FieldKey::PostalCode,
        &["postleitzahl", "plz", "postal code", "zip"],
    ),
    (FieldKey::City, &["wohnort", "stadt", "city", "ort"]),
    (
        FieldKey::CareHours,
        &[
            "betreuungsstunden",
            "betreuungszeit",
            "wochenstunden",
            "stunden",
            "care hours",
            "hours",
        ],
    ),
];

/// Keywords of a single field.
pub fn keywords_for(field: FieldKey) -> &'static [&'static str] {
    FIELD_KEYWORDS
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_keywords() {
        for field in FieldKey::ALL {
            assert!(!keywords_for(field).is_empty(), "{field} has no keywords");
        }
    }

    #[test]
    fn keywords_are_lowercase_and_trimmed() {
        for (_, keywords) in FIELD_KEYWORDS {
            for keyword in *keywords {
                assert_eq!(*keyword, keyword.trim().to_lowercase());
            }
        }
    }

    #[test]
    fn parent_fields_precede_child_fields() {
        let first_child = FIELD_KEYWORDS
            .iter()
            .position(|(field, _)| field.is_child_field())
            .unwrap();
        assert!(
            FIELD_KEYWORDS[first_child..]
                .iter()
                .all(|(field, _)| field.is_child_field())
        );
    }
}
