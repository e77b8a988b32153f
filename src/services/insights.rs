use std::collections::{HashMap, HashSet};
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::catalog::Subscription;
use crate::services::catalog::CatalogService;

/// Categories where owning two similar services usually means paying twice
/// for the same thing.
const DUPLICATE_WATCH_CATEGORIES: [&str; 3] = ["Streaming vidéo", "Musique", "Jeux vidéo"];

/// Categories that get a small value-score bonus.
const POPULAR_CATEGORIES: [&str; 3] = ["Streaming vidéo", "Musique", "Jeux vidéo"];

const POPULAR_SERVICE_IDS: [&str; 5] = [
    "netflix",
    "spotify",
    "disney-plus",
    "youtube-premium",
    "amazon-prime",
];

pub const MAX_COMPARED_SUBSCRIPTIONS: usize = 3;
const MAX_BADGES: usize = 2;

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("you can only compare {max} subscriptions at a time")]
    TooManySubscriptions { max: usize },
    #[error("unknown subscription '{0}'")]
    UnknownSubscription(String),
}

/// Total cost of a plan over a duration, rounded to cents.
pub fn calculate_total_cost(monthly_price: Decimal, months: u32) -> Decimal {
    (monthly_price * Decimal::from(months)).round_dp(2)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuplicateReason {
    #[serde(rename = "identical name")]
    IdenticalName,
    #[serde(rename = "similar names in same category")]
    SimilarNameSameCategory,
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateReason::IdenticalName => write!(f, "identical name"),
            DuplicateReason::SimilarNameSameCategory => {
                write!(f, "similar names in same category")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePair {
    pub subscription1: SubscriptionRef,
    pub subscription2: SubscriptionRef,
    pub reason: DuplicateReason,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRecommendation {
    pub subscription1: SubscriptionRef,
    pub subscription2: SubscriptionRef,
    pub reason: DuplicateReason,
    /// The side worth keeping: the cheaper one, ties broken by smaller id.
    pub keep: SubscriptionRef,
    pub keep_monthly_price: Decimal,
    pub monthly_savings: Decimal,
}

fn subscription_ref(sub: &Subscription) -> SubscriptionRef {
    SubscriptionRef {
        id: sub.id.clone(),
        name: sub.name.clone(),
    }
}

/// Pairwise duplicate scan over the selected subscriptions. O(n²) in the
/// selection size, which stays tiny (a user-curated list, not the catalog).
///
/// Pairs are visited in catalog order so the result does not depend on
/// selection insertion order, and each pair is reported at most once:
/// an identical name wins over the same-category similarity check.
pub fn detect_duplicates(
    catalog: &CatalogService,
    selection: &HashMap<String, usize>,
) -> Vec<DuplicatePair> {
    let selected: Vec<&Subscription> = catalog
        .subscriptions()
        .iter()
        .filter(|s| selection.contains_key(&s.id))
        .collect();

    let mut duplicates = Vec::new();
    for i in 0..selected.len() {
        for j in (i + 1)..selected.len() {
            let (a, b) = (selected[i], selected[j]);
            let name_a = a.name.to_lowercase();
            let name_b = b.name.to_lowercase();

            let reason = if name_a == name_b {
                Some(DuplicateReason::IdenticalName)
            } else if a.category == b.category
                && DUPLICATE_WATCH_CATEGORIES.contains(&a.category.as_str())
                && (name_a.contains(&name_b) || name_b.contains(&name_a))
            {
                Some(DuplicateReason::SimilarNameSameCategory)
            } else {
                None
            };

            if let Some(reason) = reason {
                duplicates.push(DuplicatePair {
                    subscription1: subscription_ref(a),
                    subscription2: subscription_ref(b),
                    reason,
                });
            }
        }
    }
    duplicates
}

/// For every duplicate pair, recommends keeping the cheaper subscription
/// (by minimum plan price). Equal prices tie-break to the lexicographically
/// smaller id so the result is deterministic.
pub fn recommendations_for_duplicates(
    catalog: &CatalogService,
    duplicates: &[DuplicatePair],
) -> Vec<DuplicateRecommendation> {
    duplicates
        .iter()
        .filter_map(|pair| {
            let a = catalog.get(&pair.subscription1.id)?;
            let b = catalog.get(&pair.subscription2.id)?;
            let min_a = a.min_monthly_price();
            let min_b = b.min_monthly_price();

            let keep_first = match min_a.cmp(&min_b) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => a.id < b.id,
            };
            let (keep, keep_price) = if keep_first { (a, min_a) } else { (b, min_b) };

            Some(DuplicateRecommendation {
                subscription1: pair.subscription1.clone(),
                subscription2: pair.subscription2.clone(),
                reason: pair.reason,
                keep: subscription_ref(keep),
                keep_monthly_price: keep_price,
                monthly_savings: (min_a - min_b).abs(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyCostBreakdown {
    /// Cost of non-shared subscriptions, counted once per household member.
    pub individual: Decimal,
    /// Cost of shared subscriptions, counted once.
    pub shared: Decimal,
    pub total: Decimal,
    /// What the household saves versus everyone subscribing on their own.
    pub savings: Decimal,
    pub per_person: Decimal,
    pub household_size: u32,
}

/// Shared-cost breakdown over a household. `household_size` is clamped to
/// 1..=10 at this boundary; selection entries pointing at unknown ids or
/// plan indexes are skipped.
pub fn family_cost(
    catalog: &CatalogService,
    selection: &HashMap<String, usize>,
    shared: &HashSet<String>,
    household_size: u32,
    months: u32,
) -> FamilyCostBreakdown {
    let size = household_size.clamp(1, 10);
    let size_dec = Decimal::from(size);

    let mut individual = Decimal::ZERO;
    let mut shared_total = Decimal::ZERO;
    let mut everyone_individual = Decimal::ZERO;

    for (id, plan_index) in selection {
        let Some(sub) = catalog.get(id) else { continue };
        let Some(plan) = sub.plans.get(*plan_index) else { continue };
        let cost = calculate_total_cost(plan.monthly_price, months);

        if shared.contains(id) {
            shared_total += cost;
        } else {
            individual += cost * size_dec;
        }
        everyone_individual += cost * size_dec;
    }

    let total = individual + shared_total;
    FamilyCostBreakdown {
        individual,
        shared: shared_total,
        total,
        savings: everyone_individual - total,
        per_person: (total / size_dec).round_dp(2),
        household_size: size,
    }
}

/// Deterministic 1-5 value rating. Cheaper services with more plan choices
/// in a popular category score higher. Presentation heuristic only.
pub fn value_score(subscription: &Subscription) -> f64 {
    let min_price = subscription.min_monthly_price().to_f64().unwrap_or(0.0);
    let plan_count = subscription.plans.len() as f64;

    let mut score = 5.0;
    score *= ((50.0 - min_price) / 50.0).max(0.0);
    score += (plan_count / 5.0).min(1.0);
    if POPULAR_CATEGORIES.contains(&subscription.category.as_str()) {
        score += 0.5;
    }

    score.clamp(1.0, 5.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    BestPrice,
    GreatValue,
    ManyPlans,
    Popular,
    Free,
    LowPrice,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::BestPrice => "Meilleur prix",
            Badge::GreatValue => "Excellent rapport",
            Badge::ManyPlans => "Choix variés",
            Badge::Popular => "Populaire",
            Badge::Free => "Gratuit",
            Badge::LowPrice => "Petit prix",
        }
    }
}

/// At most two badges per card, checked in a fixed order so the most
/// meaningful ones win.
pub fn badges_for(catalog: &CatalogService, subscription: &Subscription) -> Vec<Badge> {
    let mut badges = Vec::new();
    let min_price = subscription.min_monthly_price();

    if catalog.category_lowest_price(&subscription.category) == Some(min_price) {
        badges.push(Badge::BestPrice);
    }

    let global_avg = catalog.global_average_min_price();
    if min_price < global_avg * Decimal::new(7, 1) {
        badges.push(Badge::GreatValue);
    }

    if subscription.plans.len() >= 3 {
        badges.push(Badge::ManyPlans);
    }

    if POPULAR_SERVICE_IDS.contains(&subscription.id.as_str()) {
        badges.push(Badge::Popular);
    }

    if min_price.is_zero() {
        badges.push(Badge::Free);
    } else if min_price < Decimal::from(3u32) {
        badges.push(Badge::LowPrice);
    }

    badges.truncate(MAX_BADGES);
    badges
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub min_monthly_price: Decimal,
    pub max_monthly_price: Decimal,
    pub plan_count: usize,
    pub value_score: f64,
    /// Cheapest-plan cost over the requested duration.
    pub total_cost: Decimal,
}

/// Side-by-side comparison of up to [`MAX_COMPARED_SUBSCRIPTIONS`] services.
/// More than that is rejected with a user-facing error, not a panic.
pub fn compare_subscriptions(
    catalog: &CatalogService,
    ids: &[String],
    months: u32,
) -> Result<Vec<ComparisonRow>, InsightsError> {
    if ids.len() > MAX_COMPARED_SUBSCRIPTIONS {
        return Err(InsightsError::TooManySubscriptions {
            max: MAX_COMPARED_SUBSCRIPTIONS,
        });
    }

    ids.iter()
        .map(|id| {
            let sub = catalog
                .get(id)
                .ok_or_else(|| InsightsError::UnknownSubscription(id.clone()))?;
            let min_price = sub.min_monthly_price();
            let max_price = sub
                .plans
                .iter()
                .map(|p| p.monthly_price)
                .max()
                .unwrap_or(Decimal::ZERO);
            Ok(ComparisonRow {
                id: sub.id.clone(),
                name: sub.name.clone(),
                category: sub.category.clone(),
                min_monthly_price: min_price,
                max_monthly_price: max_price,
                plan_count: sub.plans.len(),
                value_score: value_score(sub),
                total_cost: calculate_total_cost(min_price, months),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::test_fixtures::{sample_catalog, subscription};
    use crate::models::catalog::CatalogFile;
    use crate::models::catalog::DurationOption;
    use rust_decimal_macros::dec;

    fn selection(ids: &[&str]) -> HashMap<String, usize> {
        ids.iter().map(|id| (id.to_string(), 0)).collect()
    }

    #[test]
    fn total_cost_rounds_to_cents() {
        assert_eq!(calculate_total_cost(dec!(9.99), 12), dec!(119.88));
        assert_eq!(calculate_total_cost(dec!(3.333), 3), dec!(10.00));
    }

    #[test]
    fn total_cost_zero_months_is_zero() {
        assert_eq!(calculate_total_cost(dec!(13.49), 0), Decimal::ZERO);
    }

    #[test]
    fn total_cost_is_linear_in_price() {
        let unit = calculate_total_cost(dec!(1), 36);
        assert_eq!(calculate_total_cost(dec!(7), 36), unit * dec!(7));
    }

    #[test]
    fn detects_similar_names_in_watched_category() {
        let catalog = sample_catalog();
        let duplicates = detect_duplicates(&catalog, &selection(&["netflix", "netflix-kids"]));

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].reason, DuplicateReason::SimilarNameSameCategory);
        assert_eq!(duplicates[0].subscription1.id, "netflix");
        assert_eq!(duplicates[0].subscription2.id, "netflix-kids");
    }

    #[test]
    fn detection_ignores_selection_insertion_order() {
        let catalog = sample_catalog();
        let forward = detect_duplicates(&catalog, &selection(&["netflix", "netflix-kids"]));
        let reversed = detect_duplicates(&catalog, &selection(&["netflix-kids", "netflix"]));

        assert_eq!(forward.len(), reversed.len());
        assert_eq!(forward[0].subscription1.id, reversed[0].subscription1.id);
        assert_eq!(forward[0].subscription2.id, reversed[0].subscription2.id);
    }

    #[test]
    fn unrelated_services_are_not_flagged() {
        let catalog = sample_catalog();
        let duplicates = detect_duplicates(&catalog, &selection(&["netflix", "spotify", "notion"]));
        assert!(duplicates.is_empty());
    }

    #[test]
    fn identical_names_are_reported_once() {
        // Same name, same watched category: only the identical-name reason
        // must come out, not a second similarity entry.
        let file = CatalogFile {
            subscriptions: vec![
                subscription("spotify", "Spotify", "Musique", &[dec!(11.12)]),
                subscription("spotify-duo", "spotify", "Musique", &[dec!(14.85)]),
            ],
            duration_options: vec![DurationOption {
                label: "1 an".to_string(),
                months: 12,
                value: "1y".to_string(),
            }],
        };
        let catalog = CatalogService::from_file(file).unwrap();
        let duplicates = detect_duplicates(&catalog, &selection(&["spotify", "spotify-duo"]));

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].reason, DuplicateReason::IdenticalName);
    }

    #[test]
    fn recommendation_keeps_the_cheaper_side() {
        let catalog = sample_catalog();
        let duplicates = detect_duplicates(&catalog, &selection(&["netflix", "netflix-kids"]));
        let recs = recommendations_for_duplicates(&catalog, &duplicates);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].keep.id, "netflix"); // 5.99 < 7.99
        assert_eq!(recs[0].keep_monthly_price, dec!(5.99));
        assert_eq!(recs[0].monthly_savings, dec!(2.00));
    }

    #[test]
    fn recommendation_ties_break_by_id() {
        let file = CatalogFile {
            subscriptions: vec![
                subscription("deezer-family", "Deezer Family", "Musique", &[dec!(11.99)]),
                subscription("deezer", "Deezer", "Musique", &[dec!(11.99)]),
            ],
            duration_options: vec![DurationOption {
                label: "1 an".to_string(),
                months: 12,
                value: "1y".to_string(),
            }],
        };
        let catalog = CatalogService::from_file(file).unwrap();
        let duplicates = detect_duplicates(&catalog, &selection(&["deezer", "deezer-family"]));
        let recs = recommendations_for_duplicates(&catalog, &duplicates);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].keep.id, "deezer");
        assert_eq!(recs[0].monthly_savings, Decimal::ZERO);
    }

    #[test]
    fn family_cost_single_person_never_saves() {
        let catalog = sample_catalog();
        let mut shared = HashSet::new();
        shared.insert("netflix".to_string());

        let breakdown = family_cost(&catalog, &selection(&["netflix", "spotify"]), &shared, 1, 12);
        assert_eq!(breakdown.savings, Decimal::ZERO);
        assert_eq!(breakdown.per_person, breakdown.total);
    }

    #[test]
    fn family_cost_breakdown_for_four_people() {
        // One shared service at 10/month and one individual at 5/month over
        // 12 months: shared = 120, individual = 60 x 4 = 240, total = 360,
        // savings = 720 - 360 = 360.
        let file = CatalogFile {
            subscriptions: vec![
                subscription("shared-svc", "Shared Svc", "Streaming vidéo", &[dec!(10)]),
                subscription("solo-svc", "Solo Svc", "Musique", &[dec!(5)]),
            ],
            duration_options: vec![DurationOption {
                label: "1 an".to_string(),
                months: 12,
                value: "1y".to_string(),
            }],
        };
        let catalog = CatalogService::from_file(file).unwrap();
        let mut shared = HashSet::new();
        shared.insert("shared-svc".to_string());

        let breakdown = family_cost(
            &catalog,
            &selection(&["shared-svc", "solo-svc"]),
            &shared,
            4,
            12,
        );
        assert_eq!(breakdown.shared, dec!(120));
        assert_eq!(breakdown.individual, dec!(240));
        assert_eq!(breakdown.total, dec!(360));
        assert_eq!(breakdown.savings, dec!(360));
        assert_eq!(breakdown.per_person, dec!(90));
    }

    #[test]
    fn family_cost_clamps_household_size() {
        let catalog = sample_catalog();
        let breakdown = family_cost(&catalog, &selection(&["spotify"]), &HashSet::new(), 0, 12);
        assert_eq!(breakdown.household_size, 1);

        let breakdown = family_cost(&catalog, &selection(&["spotify"]), &HashSet::new(), 50, 12);
        assert_eq!(breakdown.household_size, 10);
    }

    #[test]
    fn value_score_stays_within_bounds() {
        let catalog = sample_catalog();
        for sub in catalog.subscriptions() {
            let score = value_score(sub);
            assert!((1.0..=5.0).contains(&score), "{} scored {}", sub.id, score);
        }
    }

    #[test]
    fn free_service_scores_at_the_top() {
        let free = subscription("freebie", "Freebie", "Streaming vidéo", &[dec!(0)]);
        // price factor 1.0 -> 5.0, plans bonus 0.2, category bonus 0.5, clamped to 5
        assert_eq!(value_score(&free), 5.0);
    }

    #[test]
    fn expensive_service_scores_at_the_bottom() {
        let pricey = subscription("atelier", "Atelier", "Productivité", &[dec!(60)]);
        assert_eq!(value_score(&pricey), 1.0);
    }

    #[test]
    fn badges_are_capped_at_two() {
        let catalog = sample_catalog();
        // Free tier + cheapest in its category: qualifies for more than two.
        let notion = catalog.get("notion").unwrap();
        let badges = badges_for(&catalog, notion);
        assert!(badges.len() <= 2);
        assert_eq!(badges[0], Badge::BestPrice);
    }

    #[test]
    fn compare_rejects_more_than_three() {
        let catalog = sample_catalog();
        let ids: Vec<String> = ["netflix", "spotify", "deezer", "notion"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = compare_subscriptions(&catalog, &ids, 12).unwrap_err();
        assert!(matches!(err, InsightsError::TooManySubscriptions { max: 3 }));
    }

    #[test]
    fn compare_reports_price_range_and_cost() {
        let catalog = sample_catalog();
        let rows =
            compare_subscriptions(&catalog, &["netflix".to_string()], 12).unwrap();
        assert_eq!(rows[0].min_monthly_price, dec!(5.99));
        assert_eq!(rows[0].max_monthly_price, dec!(19.99));
        assert_eq!(rows[0].total_cost, dec!(71.88));
    }
}
