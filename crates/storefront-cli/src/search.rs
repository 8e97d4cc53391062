//! `search` command handler.

use storefront_core::Refinement;
use storefront_session::{QueryParam, Storefront};

/// Facet kind used for refinements given on the command line.
const CLI_REFINEMENT_KIND: &str = "DistinctValue";

#[derive(Debug)]
pub(crate) struct SearchArgs {
    pub term: Option<String>,
    pub category: Option<String>,
    pub page: i32,
    pub refinements: Vec<Refinement>,
}

/// Parses `NAME=VALUE[,VALUE...]` into a distinct-value refinement.
pub(crate) fn parse_refinement(raw: &str) -> Result<Refinement, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("refinement name is empty in '{raw}'"));
    }
    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    if values.is_empty() {
        return Err(format!("refinement '{name}' has no values"));
    }
    Ok(Refinement {
        name_or_id: name.to_owned(),
        kind: CLI_REFINEMENT_KIND.to_owned(),
        attribute_type: None,
        values,
    })
}

/// Loads the cart summary, applies each given parameter through the
/// coordinator, then prints the results view as JSON.
///
/// # Errors
///
/// Returns an error if the final search fails or the view cannot be
/// serialized. Cart summary failures are logged only.
pub(crate) async fn run_search(storefront: &Storefront, args: SearchArgs) -> anyhow::Result<()> {
    storefront.cart().refresh().await;

    let coordinator = storefront.search();
    let mut params = Vec::new();
    if args.term.is_some() {
        params.push(QueryParam::Term(args.term));
    }
    if args.category.is_some() {
        params.push(QueryParam::CategoryId(args.category));
    }
    if !args.refinements.is_empty() {
        params.push(QueryParam::Refinements(args.refinements));
    }
    if args.page != 1 {
        params.push(QueryParam::Page(args.page));
    }

    if params.is_empty() {
        coordinator.search().await?;
    }
    for param in params {
        coordinator.set_query_param(param).await?;
    }

    let view = storefront.results_view().await;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
