//! Legend data: color bins and reference tile sizes.
//!
//! Only the numbers and labels are produced here; drawing is left to the
//! renderer.

use cartogram_layout_models::{
    ColorLegendBin, LayoutConfig, Majority, PieLegendEntry, SizeLegendEntry,
};
use cartogram_region_models::DemographicProfile;

use crate::size::SizeScale;

/// Metric values shown as reference squares, largest first.
pub const SIZE_LEGEND_VALUES: &[f64] = &[100.0, 75.0, 50.0, 25.0, 10.0, 5.0, 1.0];

/// Splits the non-white ratio domain `[0, 1]` into `num_bins` equal bins.
///
/// Bins entirely at or below 0.5 are labelled with the white share, bins
/// entirely at or above 0.5 with the non-white share, and the bin that
/// straddles 0.5 (if any) as "~50/50".
#[must_use]
pub fn color_legend_bins(num_bins: u32) -> Vec<ColorLegendBin> {
    let n = f64::from(num_bins);

    (0..num_bins)
        .map(|i| {
            let start = f64::from(i) / n;
            let end = f64::from(i + 1) / n;
            let start_pct = percent(start);
            let end_pct = percent(end);

            let (majority, label) = if end <= 0.5 {
                (
                    Majority::White,
                    format!("{}–{}%", 100 - end_pct, 100 - start_pct),
                )
            } else if start >= 0.5 {
                (Majority::NonWhite, format!("{start_pct}–{end_pct}%"))
            } else {
                (Majority::Even, "~50/50".to_string())
            };

            ColorLegendBin {
                start,
                end,
                midpoint: (start + end) / 2.0,
                majority,
                label,
            }
        })
        .collect()
}

/// Reference squares for the tile size legend.
#[must_use]
pub fn size_legend(config: &LayoutConfig) -> Vec<SizeLegendEntry> {
    let scale = SizeScale::from_config(config);

    SIZE_LEGEND_VALUES
        .iter()
        .map(|&metric_value| SizeLegendEntry {
            metric_value,
            tile_size: scale.size_for(metric_value),
            label: if metric_value <= 1.0 {
                "≤1%".to_string()
            } else {
                format!("{metric_value}%")
            },
        })
        .collect()
}

/// Sub-category names across all profiles, in first-occurrence order.
///
/// This is the pie color domain: a category's index here picks its color.
#[must_use]
pub fn category_domain(profiles: &[DemographicProfile]) -> Vec<String> {
    let mut domain: Vec<String> = Vec::new();
    for count in profiles.iter().flat_map(|p| &p.sub_category_counts) {
        if !domain.contains(&count.category) {
            domain.push(count.category.clone());
        }
    }
    domain
}

/// Pie legend swatches, listed in reverse domain order so the legend reads
/// top-down in the same order the slices stack.
#[must_use]
pub fn pie_legend(categories: &[String]) -> Vec<PieLegendEntry> {
    categories
        .iter()
        .enumerate()
        .rev()
        .map(|(color_index, category)| PieLegendEntry {
            category: category.clone(),
            color_index,
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn percent(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartogram_region_models::CategoryCount;

    #[test]
    fn eleven_bins_cover_unit_interval() {
        let bins = color_legend_bins(11);
        assert_eq!(bins.len(), 11);
        assert!(bins[0].start.abs() < f64::EPSILON);
        assert!((bins[10].end - 1.0).abs() < f64::EPSILON);
        for pair in bins.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn bins_are_labelled_by_majority() {
        let bins = color_legend_bins(11);
        assert_eq!(bins[0].majority, Majority::White);
        assert_eq!(bins[0].label, "91–100%");
        assert_eq!(bins[5].majority, Majority::Even);
        assert_eq!(bins[5].label, "~50/50");
        assert_eq!(bins[10].majority, Majority::NonWhite);
        assert_eq!(bins[10].label, "91–100%");
        assert_eq!(bins[6].label, "55–64%");
    }

    #[test]
    fn even_bin_count_has_no_straddling_bin() {
        let bins = color_legend_bins(10);
        assert!(bins.iter().all(|b| b.majority != Majority::Even));
        assert_eq!(bins[4].label, "50–60%");
        assert_eq!(bins[5].label, "50–60%");
    }

    #[test]
    fn midpoints_sit_between_bounds() {
        for bin in color_legend_bins(7) {
            assert!(bin.start < bin.midpoint && bin.midpoint < bin.end);
        }
    }

    #[test]
    fn size_legend_uses_the_tile_scale() {
        let entries = size_legend(&LayoutConfig::default());
        assert_eq!(entries.len(), SIZE_LEGEND_VALUES.len());
        assert_eq!(entries[0].label, "100%");
        assert!((entries[0].tile_size - 150.0).abs() < f64::EPSILON);
        assert_eq!(entries[3].label, "25%");
        assert!((entries[3].tile_size - 90.0).abs() < f64::EPSILON);
        assert_eq!(entries[6].label, "≤1%");
    }

    #[test]
    fn category_domain_keeps_first_occurrence_order() {
        let mut ohio = crate::test_support::profile("Ohio", 1, 0);
        ohio.sub_category_counts.push(CategoryCount {
            category: "Other".to_string(),
            count: 5,
        });
        let profiles = vec![crate::test_support::profile("Texas", 0, 0), ohio];

        assert_eq!(category_domain(&profiles), vec!["Black/African American", "Asian", "Other"]);
    }

    #[test]
    fn pie_legend_lists_categories_in_reverse() {
        let domain = vec!["Black".to_string(), "Asian".to_string(), "Other".to_string()];
        let legend = pie_legend(&domain);

        let names: Vec<&str> = legend.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["Other", "Asian", "Black"]);
        assert_eq!(legend[0].color_index, 2);
        assert_eq!(legend[2].color_index, 0);
    }

    #[test]
    fn empty_domain_has_empty_pie_legend() {
        assert!(pie_legend(&[]).is_empty());
    }
}
