use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;

use crate::models::catalog::{CatalogFile, DurationOption, Subscription};

/// Read-only catalog of subscription offerings, loaded once at startup.
pub struct CatalogService {
    subscriptions: Vec<Subscription>,
    duration_options: Vec<DurationOption>,
}

impl CatalogService {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&raw)
            .with_context(|| format!("invalid catalog file {}", path.display()))?;
        Self::from_file(file)
    }

    pub fn from_file(file: CatalogFile) -> Result<Self> {
        let mut seen = HashSet::new();
        for sub in &file.subscriptions {
            if !seen.insert(sub.id.as_str()) {
                return Err(anyhow!("duplicate catalog id '{}'", sub.id));
            }
            if sub.plans.is_empty() {
                return Err(anyhow!("subscription '{}' has no plans", sub.id));
            }
        }
        if file.duration_options.is_empty() {
            return Err(anyhow!("catalog defines no duration options"));
        }

        log::info!(
            "catalog loaded: {} subscriptions, {} duration options",
            file.subscriptions.len(),
            file.duration_options.len()
        );

        Ok(Self {
            subscriptions: file.subscriptions,
            duration_options: file.duration_options,
        })
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn duration_options(&self) -> &[DurationOption] {
        &self.duration_options
    }

    pub fn get(&self, id: &str) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id)
    }

    /// Cheapest minimum price among all subscriptions of `category`.
    pub fn category_lowest_price(&self, category: &str) -> Option<Decimal> {
        self.subscriptions
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.min_monthly_price())
            .min()
    }

    /// Mean of each subscription's minimum monthly price across the whole
    /// catalog. Used by the value badges.
    pub fn global_average_min_price(&self) -> Decimal {
        if self.subscriptions.is_empty() {
            return Decimal::ZERO;
        }
        let total: Decimal = self
            .subscriptions
            .iter()
            .map(|s| s.min_monthly_price())
            .sum();
        total / Decimal::from(self.subscriptions.len())
    }
}

#[cfg(test)]
pub mod test_fixtures {
    use super::*;
    use crate::models::catalog::Plan;
    use rust_decimal_macros::dec;

    pub fn subscription(id: &str, name: &str, category: &str, prices: &[Decimal]) -> Subscription {
        Subscription {
            id: id.to_string(),
            name: name.to_string(),
            logo: name.chars().next().unwrap_or('?').to_string(),
            color: "#333333".to_string(),
            category: category.to_string(),
            description: None,
            website: None,
            plans: prices
                .iter()
                .enumerate()
                .map(|(i, p)| Plan {
                    name: format!("Formule {}", i + 1),
                    monthly_price: *p,
                })
                .collect(),
        }
    }

    /// Small fixed catalog used across the service tests.
    pub fn sample_catalog() -> CatalogService {
        let subscriptions = vec![
            subscription(
                "netflix",
                "Netflix",
                "Streaming vidéo",
                &[dec!(5.99), dec!(13.49), dec!(19.99)],
            ),
            subscription("netflix-kids", "Netflix Kids", "Streaming vidéo", &[dec!(7.99)]),
            subscription("spotify", "Spotify", "Musique", &[dec!(11.12), dec!(17.73)]),
            subscription("deezer", "Deezer", "Musique", &[dec!(11.99)]),
            subscription("xbox-game-pass", "Xbox Game Pass", "Jeux vidéo", &[dec!(14.99)]),
            subscription("notion", "Notion", "Productivité", &[dec!(0), dec!(9.50)]),
        ];
        let duration_options = vec![
            DurationOption {
                label: "1 an".to_string(),
                months: 12,
                value: "1y".to_string(),
            },
            DurationOption {
                label: "5 ans".to_string(),
                months: 60,
                value: "5y".to_string(),
            },
        ];
        CatalogService::from_file(CatalogFile {
            subscriptions,
            duration_options,
        })
        .unwrap()
    }
}
