use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::model::Style;

/// Descriptive guidance shown for a style on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDescription {
    pub style: Style,
    pub title: String,
    pub keywords: Vec<String>,
    pub behaviors: Vec<String>,
    pub tips: Vec<String>,
}

/// Exactly one description per style, stored in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptions {
    entries: Vec<StyleDescription>,
}

impl StyleDescriptions {
    /// # Errors
    ///
    /// Returns `BankError::DuplicateDescription` if a style appears twice and
    /// `BankError::MissingDescription` if any style is absent.
    pub fn new(entries: Vec<StyleDescription>) -> Result<Self, BankError> {
        let mut slots: [Option<StyleDescription>; 4] = Default::default();
        for entry in entries {
            let slot = &mut slots[entry.style.position()];
            if slot.is_some() {
                return Err(BankError::DuplicateDescription(entry.style));
            }
            *slot = Some(entry);
        }

        let mut ordered = Vec::with_capacity(slots.len());
        for (style, slot) in Style::ALL.into_iter().zip(slots) {
            ordered.push(slot.ok_or(BankError::MissingDescription(style))?);
        }
        Ok(Self { entries: ordered })
    }

    #[must_use]
    pub fn get(&self, style: Style) -> &StyleDescription {
        &self.entries[style.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDescription> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(style: Style) -> StyleDescription {
        StyleDescription {
            style,
            title: format!("{style} Style"),
            keywords: vec!["k".into()],
            behaviors: vec!["b".into()],
            tips: vec!["t".into()],
        }
    }

    #[test]
    fn orders_entries_by_style() {
        let entries = vec![
            describe(Style::Expressive),
            describe(Style::Amiable),
            describe(Style::Driver),
            describe(Style::Analytical),
        ];
        let descriptions = StyleDescriptions::new(entries).unwrap();
        let styles: Vec<_> = descriptions.iter().map(|d| d.style).collect();
        assert_eq!(styles, Style::ALL.to_vec());
        assert_eq!(descriptions.get(Style::Amiable).title, "Amiable Style");
    }

    #[test]
    fn missing_and_duplicate_styles_fail() {
        let err = StyleDescriptions::new(vec![
            describe(Style::Driver),
            describe(Style::Analytical),
            describe(Style::Amiable),
        ])
        .unwrap_err();
        assert_eq!(err, BankError::MissingDescription(Style::Expressive));

        let err = StyleDescriptions::new(vec![describe(Style::Driver), describe(Style::Driver)])
            .unwrap_err();
        assert_eq!(err, BankError::DuplicateDescription(Style::Driver));
    }
}
