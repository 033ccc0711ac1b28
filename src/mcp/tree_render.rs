//! ASCII tree rendering for the catalog hierarchy.

use crate::models::{CatalogDatabase, CatalogTable};

/// Render databases and their tables as an ASCII tree.
///
/// Example output:
/// ```text
/// sales (2 tables)
/// ├── customers
/// └── daily_totals (view)
/// logs (0 tables)
/// ```
pub fn render_tree(databases: &[(CatalogDatabase, Vec<CatalogTable>)]) -> String {
    let mut output = String::new();
    for (database, tables) in databases {
        render_database(&mut output, database, tables);
    }
    output
}

fn render_database(output: &mut String, database: &CatalogDatabase, tables: &[CatalogTable]) {
    output.push_str(&database.name);
    output.push_str(&format!(
        " ({} table{})\n",
        tables.len(),
        if tables.len() == 1 { "" } else { "s" }
    ));

    for (i, table) in tables.iter().enumerate() {
        let is_last = i == tables.len() - 1;
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(&table.name);
        if table.is_view() {
            output.push_str(" (view)");
        }
        output.push('\n');
    }
}
