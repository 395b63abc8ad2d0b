//! Parameters of the z-score normalization algorithm

use analytics_core::{Error, Result, Status};
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// Computation method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Scan the table to compute means and variances
    #[default]
    DefaultDense,
    /// Derive means and variances from caller-supplied column sums
    SumDense,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DefaultDense => "defaultDense",
            Self::SumDense => "sumDense",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "defaultDense" => Ok(Self::DefaultDense),
            "sumDense" => Ok(Self::SumDense),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

bitflags! {
    /// Optional statistics to return alongside the normalized data
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResultsToCompute: u32 {
        /// Per-column means
        const MEAN = 0b01;
        /// Per-column variances
        const VARIANCE = 0b10;
    }
}

/// What to do with a column whose variance is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroVariancePolicy {
    /// Write 0 for every element of the column
    #[default]
    EmitZero,
    /// Fail with [`Error::DegenerateColumn`]
    Reject,
}

/// Column sums aggregated by an earlier stage, used by [`Method::SumDense`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrecomputedSums {
    pub sums: Vec<f64>,
    pub sums_of_squares: Vec<f64>,
}

/// Z-score normalization parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub method: Method,
    pub results_to_compute: ResultsToCompute,
    /// Divide by the standard deviation; when false the data is only centered
    pub do_scale: bool,
    pub zero_variance: ZeroVariancePolicy,
    /// Required by [`Method::SumDense`], ignored otherwise
    pub sums: Option<PrecomputedSums>,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            method: Method::DefaultDense,
            results_to_compute: ResultsToCompute::empty(),
            do_scale: true,
            zero_variance: ZeroVariancePolicy::EmitZero,
            sums: None,
        }
    }
}

impl Parameter {
    pub fn default_dense() -> Self {
        Self::default()
    }

    pub fn sum_dense(sums: Vec<f64>, sums_of_squares: Vec<f64>) -> Self {
        Self {
            method: Method::SumDense,
            sums: Some(PrecomputedSums {
                sums,
                sums_of_squares,
            }),
            ..Self::default()
        }
    }

    /// Parameter for a method given by name
    pub fn for_method(name: &str) -> Result<Self> {
        Ok(Self {
            method: name.parse()?,
            ..Self::default()
        })
    }

    pub fn with_results(mut self, results: ResultsToCompute) -> Self {
        self.results_to_compute = results;
        self
    }

    pub fn with_scale(mut self, do_scale: bool) -> Self {
        self.do_scale = do_scale;
        self
    }

    pub fn with_zero_variance(mut self, policy: ZeroVariancePolicy) -> Self {
        self.zero_variance = policy;
        self
    }

    pub fn wants(&self, results: ResultsToCompute) -> bool {
        self.results_to_compute.contains(results)
    }

    /// Check the parameter against a table with `n_cols` columns
    pub fn check(&self, n_cols: usize) -> Result<()> {
        match self.method {
            Method::DefaultDense => Ok(()),
            Method::SumDense => {
                let sums = self.sums.as_ref().ok_or_else(|| {
                    Error::NullParameter("sumDense requires precomputed column sums".to_string())
                })?;
                let mut status = Status::new();
                if sums.sums.len() != n_cols {
                    status.push(Error::size_mismatch(n_cols, sums.sums.len(), "column sums"));
                }
                if sums.sums_of_squares.len() != n_cols {
                    status.push(Error::size_mismatch(
                        n_cols,
                        sums.sums_of_squares.len(),
                        "column sums of squares",
                    ));
                }
                status.into_result()
            }
        }
    }
}
