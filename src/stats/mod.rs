//! Collection statistics and summaries
//!
//! Head count, age distribution and duplicate identifiers for a record
//! collection. Rendering (charts, dashboards) is left to front ends; this
//! module only produces the numbers.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::{Employee, EmployeeField};

/// One equal-width bin of an age histogram
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge, exclusive except for the last bin
    pub upper: f64,
    pub count: usize,
}

/// Age distribution in equal-width bins spanning the observed ages
#[derive(Debug, Clone, PartialEq)]
pub struct AgeHistogram {
    pub bins: Vec<AgeBin>,
}

impl AgeHistogram {
    /// Number of bins used by [`Statistics::compute`]
    pub const DEFAULT_BINS: usize = 10;

    /// Bin `ages` into `bin_count` equal-width bins over `[min, max]`
    ///
    /// When every age is the same the range is widened to `age ± 0.5`.
    /// Returns `None` for no ages or zero bins.
    #[must_use]
    pub fn from_ages(ages: &[i32], bin_count: usize) -> Option<Self> {
        if bin_count == 0 {
            return None;
        }
        let (min, max) = ages.iter().copied().minmax().into_option()?;

        let (lower, upper) = if min == max {
            (f64::from(min) - 0.5, f64::from(max) + 0.5)
        } else {
            (f64::from(min), f64::from(max))
        };
        let width = (upper - lower) / bin_count as f64;

        let mut bins: Vec<AgeBin> = (0..bin_count)
            .map(|i| AgeBin {
                lower: lower + width * i as f64,
                upper: lower + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for &age in ages {
            let offset = ((f64::from(age) - lower) / width).floor() as usize;
            bins[offset.min(bin_count - 1)].count += 1;
        }

        Some(Self { bins })
    }

    /// Total number of ages binned
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Summary statistics of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub mean_age: Option<f64>,
    pub histogram: Option<AgeHistogram>,
}

impl Statistics {
    /// Compute statistics with ages taken as `current_year - birth_year`
    ///
    /// Loaded birth years are not re-validated; records whose age cannot be
    /// computed count toward `count` but are left out of the age figures.
    #[must_use]
    pub fn compute(records: &[Employee], current_year: i32) -> Self {
        let ages: Vec<i32> = records
            .iter()
            .filter_map(|e| e.age_in(current_year))
            .collect();
        let mean_age = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64)
        };

        Self {
            count: records.len(),
            min_age: ages.iter().copied().min(),
            max_age: ages.iter().copied().max(),
            mean_age,
            histogram: AgeHistogram::from_ages(&ages, AgeHistogram::DEFAULT_BINS),
        }
    }

    /// Multi-line text summary
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Employee Summary:\n");
        summary.push_str(&format!("  Total Employees: {}\n", self.count));

        if let (Some(min), Some(max), Some(mean)) = (self.min_age, self.max_age, self.mean_age) {
            summary.push_str(&format!("  Age Range: {min} - {max}\n"));
            summary.push_str(&format!("  Mean Age: {mean:.1}\n"));
        }

        if let Some(histogram) = &self.histogram {
            summary.push_str("\nAge Distribution:\n");
            for bin in &histogram.bins {
                summary.push_str(&format!(
                    "  {:>5.1} - {:>5.1}: {:>4} {}\n",
                    bin.lower,
                    bin.upper,
                    bin.count,
                    "#".repeat(bin.count)
                ));
            }
        }

        summary
    }
}

/// Records sharing the value of an identifier column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub field: EmployeeField,
    pub value: String,
    /// Positions in the collection, ascending
    pub indices: Vec<usize>,
}

/// Groups of records sharing an employee ID or a national ID
///
/// Nothing prevents duplicates from being stored; this only reports them.
#[must_use]
pub fn find_duplicates(records: &[Employee]) -> Vec<DuplicateGroup> {
    let mut groups = Vec::new();

    for field in [EmployeeField::EmployeeId, EmployeeField::NationalId] {
        let mut seen: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, employee) in records.iter().enumerate() {
            seen.entry(employee.field_value(field)).or_default().push(index);
        }

        groups.extend(
            seen.into_iter()
                .filter(|(_, indices)| indices.len() > 1)
                .map(|(value, indices)| DuplicateGroup {
                    field,
                    value,
                    indices,
                })
                .sorted_by_key(|group| group.indices[0]),
        );
    }

    groups
}

/// Status bar text: record count followed by a message
#[must_use]
pub fn status_line(count: usize, message: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} employee{plural} | {message}")
}
