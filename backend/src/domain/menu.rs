//! Menu catalogue model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Money;

/// Maximum allowed length for a menu item name, in characters.
pub const MENU_ITEM_NAME_MAX: usize = 80;
/// Maximum allowed length for a menu item description, in characters.
pub const MENU_ITEM_DESCRIPTION_MAX: usize = 280;

/// Validation errors for menu input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuValidationError {
    #[error("menu item id must be positive")]
    NonPositiveId,
    #[error("menu item name must not be empty")]
    EmptyName,
    #[error("menu item name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("menu item description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("menu item price must be greater than zero")]
    NonPositivePrice,
}

impl MenuValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::NonPositivePrice => "price",
        }
    }
}

/// Store-assigned menu item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MenuItemId(i64);

impl MenuItemId {
    /// Validate and wrap a raw identifier.
    pub const fn new(raw: i64) -> Result<Self, MenuValidationError> {
        if raw <= 0 {
            return Err(MenuValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MenuItemId> for i64 {
    fn from(value: MenuItemId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for MenuItemId {
    type Error = MenuValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[schema(value_type = i64, example = 4)]
    pub id: MenuItemId,
    #[schema(example = "Taco al pastor")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = String, example = "25.00")]
    pub price: Money,
    pub available: bool,
    #[schema(value_type = String, format = DateTime, example = "2026-01-15T18:30:00Z")]
    pub created_at: DateTime<Utc>,
}

/// Validated menu item awaiting insertion. New items are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    name: String,
    description: Option<String>,
    price: Money,
}

impl NewMenuItem {
    /// Validate raw admin input.
    ///
    /// Blank descriptions are treated as absent.
    pub fn try_new(
        name: &str,
        description: Option<&str>,
        price: Money,
    ) -> Result<Self, MenuValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MenuValidationError::EmptyName);
        }
        if name.chars().count() > MENU_ITEM_NAME_MAX {
            return Err(MenuValidationError::NameTooLong {
                max: MENU_ITEM_NAME_MAX,
            });
        }
        let description = description.map(str::trim).filter(|text| !text.is_empty());
        if description.is_some_and(|text| text.chars().count() > MENU_ITEM_DESCRIPTION_MAX) {
            return Err(MenuValidationError::DescriptionTooLong {
                max: MENU_ITEM_DESCRIPTION_MAX,
            });
        }
        if price.minor_units() == 0 {
            return Err(MenuValidationError::NonPositivePrice);
        }
        Ok(Self {
            name: name.to_owned(),
            description: description.map(str::to_owned),
            price,
        })
    }

    /// Trimmed item name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Item price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  ", 100, MenuValidationError::EmptyName)]
    #[case(&"a".repeat(MENU_ITEM_NAME_MAX + 1), 100, MenuValidationError::NameTooLong { max: MENU_ITEM_NAME_MAX })]
    #[case("Gringa", 0, MenuValidationError::NonPositivePrice)]
    fn rejects_invalid_items(
        #[case] name: &str,
        #[case] minor: u64,
        #[case] expected: MenuValidationError,
    ) {
        let result = NewMenuItem::try_new(name, None, Money::from_minor_units(minor));
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    fn trims_name_and_drops_blank_description() {
        let item = NewMenuItem::try_new(" Suadero ", Some("   "), Money::from_minor_units(2_500))
            .expect("valid item");
        assert_eq!(item.name(), "Suadero");
        assert_eq!(item.description(), None);
        assert_eq!(item.price().to_string(), "25.00");
    }

    #[rstest]
    fn error_fields_match_request_fields() {
        assert_eq!(MenuValidationError::EmptyName.field(), "name");
        assert_eq!(MenuValidationError::NonPositivePrice.field(), "price");
    }
}
