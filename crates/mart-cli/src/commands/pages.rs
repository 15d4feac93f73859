use anyhow::{anyhow, Result};
use mart_query::{list_pages, Page};

pub fn handle_pages() -> Result<()> {
    for page in list_pages() {
        println!("{page}");
    }
    Ok(())
}

pub fn handle_questions(page: &str) -> Result<()> {
    let page = Page::from_label(page).ok_or_else(|| {
        let known: Vec<_> = list_pages().iter().map(|p| p.label()).collect();
        anyhow!("unknown page '{page}'; expected one of: {}", known.join(", "))
    })?;
    for question in page.questions() {
        println!("{}", question.label());
    }
    Ok(())
}
