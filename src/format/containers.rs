use std::cmp::Ordering;

use crate::types::Container;

/// Text shown when a cargo lists no containers
pub const UNSPECIFIED: &str = "Unspecified";

/// Summarise containers as `"{count}x{size}scu"` groups, smallest size first.
///
/// `[8, 8, 24]` renders as `"2x8scu 1x24scu"`. Whole sizes print without a
/// fraction (`8.0` is `"8"`). Containers without a size are grouped first with
/// an empty size.
pub fn summarize_containers(containers: &[Container]) -> String {
    if containers.is_empty() {
        return UNSPECIFIED.to_string();
    }

    let mut groups: Vec<(Option<f64>, usize)> = Vec::new();
    for container in containers {
        match groups
            .iter_mut()
            .find(|(size, _)| compare_sizes(*size, container.size) == Ordering::Equal)
        {
            Some((_, count)) => *count += 1,
            None => groups.push((container.size, 1)),
        }
    }
    groups.sort_by(|(a, _), (b, _)| compare_sizes(*a, *b));

    groups
        .into_iter()
        .map(|(size, count)| match size {
            Some(size) => format!("{count}x{size}scu"),
            None => format!("{count}xscu"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn compare_sizes(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => a.is_some().cmp(&b.is_some()),
    }
}
