use super::*;

#[test]
fn parses_bare_search() {
    let cli = Cli::try_parse_from(["storefront-cli", "search"]).expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            term,
            category,
            page,
            refinements,
        } => {
            assert!(term.is_none());
            assert!(category.is_none());
            assert_eq!(page, 1);
            assert!(refinements.is_empty());
        }
        other => panic!("expected search, got {other:?}"),
    }
}

#[test]
fn parses_search_with_refinements_and_page() {
    let cli = Cli::try_parse_from([
        "storefront-cli",
        "search",
        "--term",
        "drill",
        "--page",
        "3",
        "--refine",
        "Color__c=Red, Blue",
        "--refine",
        "Brand__c=Acme",
    ])
    .expect("expected valid cli args");

    let Commands::Search {
        term,
        page,
        refinements,
        ..
    } = cli.command
    else {
        panic!("expected search");
    };
    assert_eq!(term.as_deref(), Some("drill"));
    assert_eq!(page, 3);
    assert_eq!(refinements.len(), 2);
    assert_eq!(refinements[0].name_or_id, "Color__c");
    assert_eq!(refinements[0].values, ["Red", "Blue"]);
    assert_eq!(refinements[0].kind, "DistinctValue");
}

#[test]
fn search_accepts_unclamped_page() {
    let cli = Cli::try_parse_from(["storefront-cli", "search", "--page", "-1"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Search { page: -1, .. }));
}

#[test]
fn malformed_refinement_is_rejected() {
    assert!(Cli::try_parse_from(["storefront-cli", "search", "--refine", "Color__c"]).is_err());
    assert!(Cli::try_parse_from(["storefront-cli", "search", "--refine", "=Red"]).is_err());
    assert!(Cli::try_parse_from(["storefront-cli", "search", "--refine", "Color__c=,"]).is_err());
}

#[test]
fn parses_add_to_cart_with_defaults() {
    let cli = Cli::try_parse_from(["storefront-cli", "add-to-cart", "01t21"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::AddToCart {
            ref product_id,
            quantity: 1,
            name: None,
        } if product_id == "01t21"
    ));
}

#[test]
fn global_account_flag_is_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["storefront-cli", "cart", "--account", "001xyz"])
        .expect("expected valid cli args");
    assert_eq!(cli.account.as_deref(), Some("001xyz"));
    assert!(matches!(cli.command, Commands::Cart));
}

#[test]
fn compare_requires_product_ids() {
    assert!(Cli::try_parse_from(["storefront-cli", "compare"]).is_err());

    let cli = Cli::try_parse_from(["storefront-cli", "compare", "01t1", "01t2"])
        .expect("expected valid cli args");
    let Commands::Compare { product_ids } = cli.command else {
        panic!("expected compare");
    };
    assert_eq!(product_ids, ["01t1", "01t2"]);
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["storefront-cli"]).is_err());
}
