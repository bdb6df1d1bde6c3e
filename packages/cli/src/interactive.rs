//! Interactive dashboard session.
//!
//! Each menu choice becomes a [`SelectionAction`]. The summary is redrawn
//! from the dashboard's watch channel, so it always shows the snapshot the
//! session last published.

use std::sync::Arc;

use crime_dashboard::{Dashboard, Snapshot};
use crime_dashboard_analytics_models::{ALL, Selection, SelectionAction};
use dialoguer::Select;

use crate::render::Summary;

enum Choice {
    Month,
    Area,
    ResetArea,
    Category,
    ClearCategories,
    Reset,
    Quit,
}

impl Choice {
    const ALL: &[Self] = &[
        Self::Month,
        Self::Area,
        Self::ResetArea,
        Self::Category,
        Self::ClearCategories,
        Self::Reset,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Month => "Choose month",
            Self::Area => "Toggle borough",
            Self::ResetArea => "Reset borough",
            Self::Category => "Toggle crime type",
            Self::ClearCategories => "Clear crime types",
            Self::Reset => "Reset everything",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g., no terminal attached).
pub fn run(dashboard: &mut Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    let mut rx = dashboard.subscribe();
    let labels: Vec<&str> = Choice::ALL.iter().map(Choice::label).collect();

    println!("London Crime Dashboard");
    println!();
    draw(dashboard, &dashboard.snapshot());

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = match Choice::ALL[idx] {
            Choice::Month => Some(pick_month(dashboard)?),
            Choice::Area => pick_area(dashboard)?,
            Choice::ResetArea => Some(SelectionAction::ResetArea),
            Choice::Category => pick_category(dashboard)?,
            Choice::ClearCategories => Some(SelectionAction::ClearCategories),
            Choice::Reset => Some(SelectionAction::Reset),
            Choice::Quit => break,
        };
        let Some(action) = action else {
            continue;
        };
        dashboard.dispatch(&action);

        if rx.has_changed()? {
            let snapshot = Arc::clone(&rx.borrow_and_update());
            draw(dashboard, &snapshot);
        }
    }

    Ok(())
}

fn draw(dashboard: &Dashboard, snapshot: &Snapshot) {
    let shades = dashboard.area_shades();
    println!();
    print!(
        "{}",
        Summary {
            snapshot,
            shades: &shades,
            socio: dashboard.socio_profile(),
        }
    );
    println!();
}

fn pick_month(dashboard: &Dashboard) -> Result<SelectionAction, dialoguer::Error> {
    let mut months = vec![ALL.to_string()];
    months.extend(dashboard.store().available_months());

    let current = dashboard.selection().month.to_string();
    let idx = Select::new()
        .with_prompt("Month")
        .items(&months)
        .default(months.iter().position(|m| *m == current).unwrap_or(0))
        .interact()?;

    Ok(SelectionAction::SetMonth(Selection::from(months[idx].as_str())))
}

fn pick_area(dashboard: &Dashboard) -> Result<Option<SelectionAction>, dialoguer::Error> {
    let mut names: Vec<&str> = dashboard
        .store()
        .boundary()
        .features
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();
    if names.is_empty() {
        println!("No boroughs loaded.");
        return Ok(None);
    }

    let idx = Select::new()
        .with_prompt("Borough")
        .items(&names)
        .default(0)
        .interact()?;

    Ok(Some(SelectionAction::ToggleArea(names[idx].to_string())))
}

fn pick_category(dashboard: &Dashboard) -> Result<Option<SelectionAction>, dialoguer::Error> {
    let snapshot = dashboard.snapshot();
    let mut types: Vec<&str> = snapshot
        .bundle
        .category_ranking
        .iter()
        .map(|r| r.crime_type.as_str())
        .collect();
    for selected in &snapshot.selection.categories {
        if !types.contains(&selected.as_str()) {
            types.push(selected);
        }
    }
    if types.is_empty() {
        println!("No crime types in scope.");
        return Ok(None);
    }

    let items: Vec<String> = types
        .iter()
        .map(|t| {
            let marker = if snapshot.selection.is_category_selected(t) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {t}")
        })
        .collect();

    let idx = Select::new()
        .with_prompt("Crime type")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Some(SelectionAction::ToggleCategory(types[idx].to_string())))
}
