//! Review categories, derived from the reviews that reference them.
//!
//! A category has no row of its own: it exists while at least one review names it.

use crate::models::Review;

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    /// Arithmetic mean of the ratings in this category.
    pub average: f64,
}

impl CategorySummary {
    /// `"7.0/10"`.
    pub fn average_label(&self) -> String {
        format!("{}/10", format_rating(self.average))
    }

    pub fn count_label(&self) -> String {
        match self.count {
            1 => "1 review".to_string(),
            n => format!("{n} reviews"),
        }
    }
}

/// One summary per distinct non-blank category, in first-seen order.
///
/// Names are kept exactly as stored so each summary opens the same reviews an
/// exact-match category filter returns.
pub fn summarize(reviews: &[Review]) -> Vec<CategorySummary> {
    let mut totals: Vec<(String, usize, f64)> = Vec::new();
    for review in reviews {
        let name = review.category.as_str();
        if name.trim().is_empty() {
            continue;
        }
        match totals.iter_mut().find(|(n, _, _)| n == name) {
            Some((_, count, sum)) => {
                *count += 1;
                *sum += review.rating;
            }
            None => totals.push((name.to_string(), 1, review.rating)),
        }
    }

    totals
        .into_iter()
        .map(|(name, count, sum)| CategorySummary {
            name,
            count,
            average: sum / count as f64,
        })
        .collect()
}

/// Mean rating of `reviews`, `0.0` when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64
}

/// One decimal place.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(category: &str, rating: f64) -> Review {
        Review {
            id: format!("{category}-{rating}"),
            category: category.into(),
            title: "t".into(),
            description: String::new(),
            rating,
            user: "U".into(),
            created: String::new(),
            updated: String::new(),
        }
    }

    #[test]
    fn single_review_reports_its_rating() {
        let summaries = summarize(&[review("Coffee", 7.0)]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].average_label(), "7.0/10");
        assert_eq!(summaries[0].count_label(), "1 review");
    }

    #[test]
    fn averages_per_category_in_first_seen_order() {
        let reviews = [
            review("Tea", 3.5),
            review("Coffee", 10.0),
            review("Tea", 4.0),
            review("Coffee", 4.0),
            review("  ", 9.0),
        ];
        let summaries = summarize(&reviews);
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Tea", "Coffee"]);

        let coffee = &summaries[1];
        assert_eq!(coffee.count, 2);
        assert_eq!(coffee.average, 7.0);
        assert_eq!(coffee.count_label(), "2 reviews");
        assert_eq!(summaries[0].average_label(), "3.8/10");
    }

    #[test]
    fn padded_category_is_its_own_group() {
        let summaries = summarize(&[review("Coffee", 8.0), review(" Coffee", 2.0)]);
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Coffee", " Coffee"]);
        assert_eq!(summaries[0].average, 8.0);
        assert_eq!(summaries[1].average, 2.0);
    }

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(
            average_rating(&[review("Coffee", 10.0), review("Coffee", 4.0)]),
            7.0
        );
    }
}
