use std::path::PathBuf;

use chrono::NaiveDate;
use mart_core::{Cell, Dataset, Field, MartError};
use mart_query::pages::bivariate::correlation as bivariate_correlation;
use mart_query::catalog::{self, Page, Question};
use mart_query::DateCityFilter;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn sample() -> Dataset {
    mart_io::load(repo_path("test_data/supermarket_sales_sample.csv")).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn every_query_binds_only_existing_columns() {
    let dataset = sample();
    for question in Question::all() {
        let out = catalog::run(question, &dataset, None).unwrap();
        assert_eq!(out.question, question);
        assert_eq!(out.chart.columns, out.table.columns());
        for field in out.chart.fields() {
            assert!(
                out.table.has_column(field),
                "{question}: bound field '{field}' missing from table"
            );
        }
    }
}

#[test]
fn every_query_runs_on_an_empty_dataset() {
    let empty = Dataset::default();
    for question in Question::all() {
        let out = catalog::run(question, &empty, None).unwrap();
        if question != Question::Overview(catalog::OverviewQuestion::BasicInformation)
            && question != Question::Overview(catalog::OverviewQuestion::MissingValues)
        {
            assert!(out.table.is_empty(), "{question} produced rows from nothing");
        }
    }
}

#[test]
fn full_range_filter_returns_dataset_unchanged() {
    let dataset = sample();
    let (min, max) = dataset.date_range().unwrap();
    let filter = DateCityFilter::new(min, max, dataset.cities());
    assert_eq!(filter.apply(&dataset), dataset);
    assert_eq!(min, day("2019-01-01"));
    assert_eq!(max, day("2019-03-29"));
}

#[test]
fn inverted_range_is_empty() {
    let dataset = sample();
    let filter = DateCityFilter::new(day("2019-03-01"), day("2019-01-01"), dataset.cities());
    assert!(filter.apply(&dataset).is_empty());
}

#[test]
fn january_filter_counts_product_lines() {
    let dataset = sample();
    let filter = DateCityFilter::new(
        day("2019-01-01"),
        day("2019-01-31"),
        ["Yangon", "Mandalay"],
    );
    let question = catalog::resolve(
        "Filter by Date & City",
        "Product Line Counts in Filtered Data",
    )
    .unwrap();
    let out = catalog::run(question, &dataset, Some(&filter)).unwrap();
    let total: f64 = out
        .table
        .column("Count")
        .unwrap()
        .filter_map(Cell::as_f64)
        .sum();
    assert_eq!(total, 7.0);
    assert_eq!(out.chart.title, "Product Line Count");
}

#[test]
fn most_frequent_product_line_keeps_first_seen_ties() {
    let dataset = sample();
    let question = catalog::resolve(
        "Univariate Analysis",
        "Most Frequently Purchased Product Line",
    )
    .unwrap();
    let out = catalog::run(question, &dataset, None).unwrap();
    let order: Vec<String> = out.table.rows().iter().map(|r| r[0].to_string()).collect();
    assert_eq!(
        order,
        vec![
            "Health and beauty",
            "Electronic accessories",
            "Home and lifestyle",
            "Sports and travel",
            "Food and beverages",
            "Fashion accessories",
        ]
    );
    assert_eq!(out.table.columns(), &["Product line", "Count"]);
}

#[test]
fn payment_histogram_uses_first_seen_order() {
    let dataset = sample();
    let question =
        catalog::resolve("Univariate Analysis", "Frequency of Payment Methods").unwrap();
    let out = catalog::run(question, &dataset, None).unwrap();
    let rows: Vec<(String, Cell)> = out
        .table
        .rows()
        .iter()
        .map(|r| (r[0].to_string(), r[1].clone()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Ewallet".to_string(), Cell::Int(14)),
            ("Cash".to_string(), Cell::Int(7)),
            ("Credit card".to_string(), Cell::Int(9)),
        ]
    );
}

#[test]
fn correlation_is_symmetric_and_bounded() {
    let dataset = sample();
    let ab = bivariate_correlation(&dataset, Field::UnitPrice, Field::Quantity).unwrap();
    let ba = bivariate_correlation(&dataset, Field::Quantity, Field::UnitPrice).unwrap();
    assert_eq!(ab, ba);
    assert!((-1.0..=1.0).contains(&ab));
}

#[test]
fn unknown_question_is_reported() {
    let err = catalog::resolve("Statistical Questions", "Meaning of Life").unwrap_err();
    match err {
        MartError::UnknownQuery { page, question } => {
            assert_eq!(page, "Statistical Questions");
            assert_eq!(question, "Meaning of Life");
        }
        other => panic!("expected UnknownQuery, got {other:?}"),
    }
}

#[test]
fn pages_list_their_questions() {
    let labels: Vec<_> = Page::Bivariate
        .questions()
        .into_iter()
        .map(|q| q.label())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Total Sales Across Product Lines",
            "Correlation Between Unit Price and Quantity",
            "Average Gross Income by Gender",
            "Relationship Between Rating and Total",
        ]
    );
}

#[test]
fn query_output_serializes_labels() {
    let dataset = sample();
    let question =
        catalog::resolve("Statistical Questions", "Sales Differences by Gender").unwrap();
    let out = catalog::run(question, &dataset, None).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["page"], "Statistical Questions");
    assert_eq!(json["question"], "Sales Differences by Gender");
    assert_eq!(json["chart"]["kind"], "bar");
    assert_eq!(json["table"]["columns"][0], "Gender");
}

#[test]
fn non_finite_cells_are_treated_as_missing() {
    let text = "\
Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating
101,A,Yangon,Member,Female,Health and beauty,10,1,0.5,10.5,1/5/2019,13:08,Cash,10,4.76,0.5,NaN
102,A,Yangon,Normal,Female,Health and beauty,20,1,1,inf,1/6/2019,13:08,Cash,20,4.76,1,7.5
103,B,Mandalay,Normal,Male,Sports and travel,30,1,1.5,31.5,1/7/2019,13:08,Ewallet,30,4.76,1.5,8
";
    let dataset = mart_io::load_from_reader(text.as_bytes()).unwrap();

    let missing = catalog::run(
        catalog::resolve("Dataset Overview", "Missing Values").unwrap(),
        &dataset,
        None,
    )
    .unwrap();
    let missing_of = |label: &str| {
        missing
            .table
            .rows()
            .iter()
            .find(|row| row[0] == Cell::from(label))
            .map(|row| row[1].clone())
            .unwrap()
    };
    assert_eq!(missing_of("Rating"), Cell::Int(1));
    assert_eq!(missing_of("Total"), Cell::Int(1));

    let ratings = catalog::run(
        catalog::resolve("Statistical Questions", "Rating Distribution & Outliers").unwrap(),
        &dataset,
        None,
    )
    .unwrap();
    let row = &ratings.table.rows()[0];
    assert_eq!(row[1], Cell::Int(2));
    assert!(row.iter().filter_map(Cell::as_f64).all(|v| v.is_finite()));
    assert_eq!(
        ratings.table.column("outliers").unwrap().next(),
        Some(&Cell::Int(0))
    );
    assert_eq!(ratings.notes, vec!["Outliers: none"]);

    let by_gender = catalog::run(
        catalog::resolve("Statistical Questions", "Sales Differences by Gender").unwrap(),
        &dataset,
        None,
    )
    .unwrap();
    assert_eq!(by_gender.table.rows()[0][1], Cell::Float(10.5));
    assert_eq!(by_gender.table.rows()[1][1], Cell::Float(31.5));
}
