//! Category display formatting

use crate::models::Category;

/// Format categories as an aligned list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budget category add' to create one.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<8}  {:>12}  {}\n",
        "Category",
        "Type",
        "Budget",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<8}  {:->12}  {:-<12}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:<8}  {:>12}  {}\n",
            category.name,
            category.category_type,
            category.budget_amount,
            category.id,
            width = name_width
        ));
    }

    let total: crate::models::Money = categories.iter().map(|c| c.budget_amount).sum();
    output.push_str(&format!(
        "{:<width$}  {:<8}  {:>12}\n",
        "Total",
        "",
        total,
        width = name_width
    ));

    output
}

/// Format category details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:     {}\n", category.id));
    output.push_str(&format!("  Type:   {}\n", category.category_type));
    output.push_str(&format!("  Budget: {} per month\n", category.budget_amount));
    if let Some(color) = &category.color {
        output.push_str(&format!("  Color:  {}\n", color));
    }

    output
}
