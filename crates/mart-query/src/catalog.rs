//! The fixed registry of pages and questions.
//!
//! Every question is a variant of [`Question`]; dispatch is an exhaustive
//! `match`, so a question cannot exist without its computation. Labels are
//! only parsed at the boundary, in [`resolve`].

use std::fmt;

use mart_core::{Dataset, DerivedTable, MartError, MartResult};
use mart_viz::ChartInstruction;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::filter::DateCityFilter;
use crate::pages::{bivariate, filtered, multivariate, overview, statistical, univariate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Overview,
    Univariate,
    Bivariate,
    Multivariate,
    Statistical,
    Filter,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::Univariate,
        Page::Bivariate,
        Page::Multivariate,
        Page::Statistical,
        Page::Filter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Dataset Overview",
            Page::Univariate => "Univariate Analysis",
            Page::Bivariate => "Bivariate Analysis",
            Page::Multivariate => "Multivariate Analysis",
            Page::Statistical => "Statistical Questions",
            Page::Filter => "Filter by Date & City",
        }
    }

    pub fn from_label(label: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.label() == label)
    }

    /// Questions offered on this page, in menu order.
    pub fn questions(self) -> Vec<Question> {
        match self {
            Page::Overview => OverviewQuestion::ALL.map(Question::Overview).to_vec(),
            Page::Univariate => UnivariateQuestion::ALL.map(Question::Univariate).to_vec(),
            Page::Bivariate => BivariateQuestion::ALL.map(Question::Bivariate).to_vec(),
            Page::Multivariate => MultivariateQuestion::ALL
                .map(Question::Multivariate)
                .to_vec(),
            Page::Statistical => StatisticalQuestion::ALL
                .map(Question::Statistical)
                .to_vec(),
            Page::Filter => FilterQuestion::ALL.map(Question::Filter).to_vec(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverviewQuestion {
    RawData,
    BasicInformation,
    MissingValues,
}

impl OverviewQuestion {
    pub const ALL: [OverviewQuestion; 3] = [
        OverviewQuestion::RawData,
        OverviewQuestion::BasicInformation,
        OverviewQuestion::MissingValues,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverviewQuestion::RawData => "Raw Data Preview",
            OverviewQuestion::BasicInformation => "Basic Information",
            OverviewQuestion::MissingValues => "Missing Values",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnivariateQuestion {
    UnitPriceDistribution,
    PaymentFrequency,
    RatingDistribution,
    TopProductLine,
    QuantityPerProductLine,
}

impl UnivariateQuestion {
    pub const ALL: [UnivariateQuestion; 5] = [
        UnivariateQuestion::UnitPriceDistribution,
        UnivariateQuestion::PaymentFrequency,
        UnivariateQuestion::RatingDistribution,
        UnivariateQuestion::TopProductLine,
        UnivariateQuestion::QuantityPerProductLine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UnivariateQuestion::UnitPriceDistribution => "Distribution of Unit Prices",
            UnivariateQuestion::PaymentFrequency => "Frequency of Payment Methods",
            UnivariateQuestion::RatingDistribution => "Distribution of Customer Ratings",
            UnivariateQuestion::TopProductLine => "Most Frequently Purchased Product Line",
            UnivariateQuestion::QuantityPerProductLine => "Average Quantity per Product Line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BivariateQuestion {
    SalesByProductLine,
    PriceQuantityCorrelation,
    IncomeByGender,
    RatingVsTotal,
}

impl BivariateQuestion {
    pub const ALL: [BivariateQuestion; 4] = [
        BivariateQuestion::SalesByProductLine,
        BivariateQuestion::PriceQuantityCorrelation,
        BivariateQuestion::IncomeByGender,
        BivariateQuestion::RatingVsTotal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BivariateQuestion::SalesByProductLine => "Total Sales Across Product Lines",
            BivariateQuestion::PriceQuantityCorrelation => {
                "Correlation Between Unit Price and Quantity"
            }
            BivariateQuestion::IncomeByGender => "Average Gross Income by Gender",
            BivariateQuestion::RatingVsTotal => "Relationship Between Rating and Total",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultivariateQuestion {
    IncomeByCityAndCustomerType,
    PriceQuantityTotal,
    IncomeByGenderAndProductLine,
    RatingByBranchAndProductLine,
    SalesByDatePaymentBranch,
}

impl MultivariateQuestion {
    pub const ALL: [MultivariateQuestion; 5] = [
        MultivariateQuestion::IncomeByCityAndCustomerType,
        MultivariateQuestion::PriceQuantityTotal,
        MultivariateQuestion::IncomeByGenderAndProductLine,
        MultivariateQuestion::RatingByBranchAndProductLine,
        MultivariateQuestion::SalesByDatePaymentBranch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MultivariateQuestion::IncomeByCityAndCustomerType => {
                "Gross Income by City and Customer Type"
            }
            MultivariateQuestion::PriceQuantityTotal => {
                "Unit Price, Quantity, and Total Relationship"
            }
            MultivariateQuestion::IncomeByGenderAndProductLine => {
                "Gender Preference by Product Line and Gross Income"
            }
            MultivariateQuestion::RatingByBranchAndProductLine => {
                "Average Rating by Branch and Product Line"
            }
            MultivariateQuestion::SalesByDatePaymentBranch => "Sales by Time, Payment, and Branch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticalQuestion {
    IncomePerProductLine,
    AverageTotalByCity,
    RatingOutliers,
    SalesByGender,
    PaymentSpending,
}

impl StatisticalQuestion {
    pub const ALL: [StatisticalQuestion; 5] = [
        StatisticalQuestion::IncomePerProductLine,
        StatisticalQuestion::AverageTotalByCity,
        StatisticalQuestion::RatingOutliers,
        StatisticalQuestion::SalesByGender,
        StatisticalQuestion::PaymentSpending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatisticalQuestion::IncomePerProductLine => "Average Gross Income per Product Line",
            StatisticalQuestion::AverageTotalByCity => "Highest Average Total Sales by City",
            StatisticalQuestion::RatingOutliers => "Rating Distribution & Outliers",
            StatisticalQuestion::SalesByGender => "Sales Differences by Gender",
            StatisticalQuestion::PaymentSpending => "Popular Payment Methods and Spending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterQuestion {
    FilteredData,
    ProductLineCounts,
}

impl FilterQuestion {
    pub const ALL: [FilterQuestion; 2] =
        [FilterQuestion::FilteredData, FilterQuestion::ProductLineCounts];

    pub fn label(self) -> &'static str {
        match self {
            FilterQuestion::FilteredData => "Filtered Data",
            FilterQuestion::ProductLineCounts => "Product Line Counts in Filtered Data",
        }
    }
}

/// Every registered (page, question) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    Overview(OverviewQuestion),
    Univariate(UnivariateQuestion),
    Bivariate(BivariateQuestion),
    Multivariate(MultivariateQuestion),
    Statistical(StatisticalQuestion),
    Filter(FilterQuestion),
}

impl Question {
    pub fn page(self) -> Page {
        match self {
            Question::Overview(_) => Page::Overview,
            Question::Univariate(_) => Page::Univariate,
            Question::Bivariate(_) => Page::Bivariate,
            Question::Multivariate(_) => Page::Multivariate,
            Question::Statistical(_) => Page::Statistical,
            Question::Filter(_) => Page::Filter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Question::Overview(q) => q.label(),
            Question::Univariate(q) => q.label(),
            Question::Bivariate(q) => q.label(),
            Question::Multivariate(q) => q.label(),
            Question::Statistical(q) => q.label(),
            Question::Filter(q) => q.label(),
        }
    }

    /// Every question of every page, in menu order.
    pub fn all() -> impl Iterator<Item = Question> {
        Page::ALL.into_iter().flat_map(Page::questions)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.page(), self.label())
    }
}

impl Serialize for Question {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub fn pages() -> &'static [Page] {
    &Page::ALL
}

/// Looks up a question by its page and question labels.
pub fn resolve(page: &str, question: &str) -> MartResult<Question> {
    Page::from_label(page)
        .and_then(|p| p.questions().into_iter().find(|q| q.label() == question))
        .ok_or_else(|| MartError::unknown_query(page, question))
}

/// Result of one interaction: data, how to draw it, and free-text findings.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub page: Page,
    pub question: Question,
    pub table: DerivedTable,
    pub chart: ChartInstruction,
    /// Scalar findings shown next to the chart (e.g. `Correlation: 0.01`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl QueryOutput {
    pub(crate) fn new(question: Question, table: DerivedTable, chart: ChartInstruction) -> Self {
        Self {
            page: question.page(),
            question,
            table,
            chart,
            notes: Vec::new(),
        }
    }

    pub(crate) fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Runs `question` over `dataset`.
///
/// `filter` is consulted only by the filter page; when absent that page uses
/// [`DateCityFilter::full_range`], matching its initial widget state.
pub fn run(
    question: Question,
    dataset: &Dataset,
    filter: Option<&DateCityFilter>,
) -> MartResult<QueryOutput> {
    debug!(page = %question.page(), question = question.label(), rows = dataset.len(), "running query");
    match question {
        Question::Overview(q) => overview::run(q, dataset),
        Question::Univariate(q) => univariate::run(q, dataset),
        Question::Bivariate(q) => bivariate::run(q, dataset),
        Question::Multivariate(q) => multivariate::run(q, dataset),
        Question::Statistical(q) => statistical::run(q, dataset),
        Question::Filter(q) => {
            let filter = filter
                .cloned()
                .unwrap_or_else(|| DateCityFilter::full_range(dataset));
            filtered::run(q, dataset, &filter)
        }
    }
}
