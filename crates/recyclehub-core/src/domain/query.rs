use std::str::FromStr;

use crate::domain::Listing;
use crate::error::DomainError;

/// Fields a listing search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Material,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "material" => Ok(SortField::Material),
            other => Err(DomainError::Validation(format!(
                "Unsupported sort_by value '{other}' (supported: material)"
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::Validation(format!(
                "Unsupported order value '{other}' (supported: asc, desc)"
            ))),
        }
    }
}

/// Filter and ordering for listing searches.
///
/// `material` and `action` are case-insensitive substring matches.
/// Without a sort the store's insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub material: Option<String>,
    pub action: Option<String>,
    pub sort: Option<(SortField, SortOrder)>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ListingQuery {
    /// Build a query from raw request parameters. `order` is only
    /// meaningful together with `sort_by`.
    pub fn from_params(
        material: Option<&str>,
        action: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Self, DomainError> {
        let sort = match non_empty(sort_by) {
            Some(field) => {
                let field = field.parse::<SortField>()?;
                let order = match non_empty(order) {
                    Some(order) => order.parse::<SortOrder>()?,
                    None => SortOrder::default(),
                };
                Some((field, order))
            }
            None => None,
        };

        Ok(Self {
            material: non_empty(material),
            action: non_empty(action),
            sort,
        })
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let material_ok = self
            .material
            .as_deref()
            .is_none_or(|m| contains_ignore_case(&listing.material, m));
        let action_ok = self
            .action
            .as_deref()
            .is_none_or(|a| contains_ignore_case(&listing.action, a));

        material_ok && action_ok
    }

    /// Filter and order listings. The sort is stable, so ties keep input order.
    pub fn apply(&self, listings: impl IntoIterator<Item = Listing>) -> Vec<Listing> {
        let mut result: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();

        if let Some((SortField::Material, order)) = self.sort {
            result.sort_by(|a, b| match order {
                SortOrder::Asc => a.material.cmp(&b.material),
                SortOrder::Desc => b.material.cmp(&a.material),
            });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingContent;

    fn listing(material: &str, action: &str) -> Listing {
        Listing::new(
            ListingContent {
                title: format!("{material} lot"),
                description: "bulk".into(),
                location: "Austin".into(),
                action: action.into(),
                material: material.into(),
            },
            None,
            None,
        )
    }

    #[test]
    fn test_from_params_defaults() {
        let q = ListingQuery::from_params(None, Some(""), None, Some("desc")).unwrap();
        assert_eq!(q, ListingQuery::default());

        let q = ListingQuery::from_params(None, None, Some("material"), None).unwrap();
        assert_eq!(q.sort, Some((SortField::Material, SortOrder::Asc)));
    }

    #[test]
    fn test_from_params_rejects_unknown_sort() {
        assert!(ListingQuery::from_params(None, None, Some("title"), None).is_err());
        assert!(ListingQuery::from_params(None, None, Some("material"), Some("up")).is_err());
    }

    #[test]
    fn test_material_filter_is_case_insensitive_substring() {
        let q = ListingQuery::from_params(Some("glass"), None, None, None).unwrap();
        let result = q.apply(vec![
            listing("Green Glass", "sell"),
            listing("aluminum", "sell"),
            listing("GLASSWARE", "donate"),
        ]);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|l| l.material.to_lowercase().contains("glass")));
    }

    #[test]
    fn test_empty_result_is_valid() {
        let q = ListingQuery::from_params(Some("copper"), Some("donate"), None, None).unwrap();
        assert!(q.apply(vec![listing("aluminum", "donate")]).is_empty());
    }

    #[test]
    fn test_sort_desc_is_non_increasing() {
        let q = ListingQuery::from_params(None, None, Some("material"), Some("DESC")).unwrap();
        let result = q.apply(vec![
            listing("glass", "sell"),
            listing("aluminum", "sell"),
            listing("steel", "sell"),
            listing("copper", "sell"),
        ]);

        let materials: Vec<&str> = result.iter().map(|l| l.material.as_str()).collect();
        assert_eq!(materials, vec!["steel", "glass", "copper", "aluminum"]);
    }

    #[test]
    fn test_unsorted_keeps_insertion_order() {
        let q = ListingQuery::default();
        let result = q.apply(vec![listing("b", "sell"), listing("a", "sell")]);
        assert_eq!(result[0].material, "b");
        assert_eq!(result[1].material, "a");
    }
}
