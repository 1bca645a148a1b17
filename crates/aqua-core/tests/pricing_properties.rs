//! Property tests for the pricing engine and quote totals.

use aqua_core::{
    compute_unit_price, Catalog, Money, PricingError, PricingMode, Product, Quotation, TaxFactor,
};
use aqua_core::validation::ProductInput;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000).prop_map(Money::from_cents)
}

fn margin_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..50_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn tax_strategy() -> impl Strategy<Value = TaxFactor> {
    (0i64..=3000).prop_map(|bps| {
        TaxFactor::from_rate_percent(Decimal::new(bps, 2)).expect("non-negative rate")
    })
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (money_strategy(), money_strategy(), money_strategy(), 0u32..100).prop_map(
        |(cost, retail, case, units)| Product {
            id: 1,
            name: "Garrafón 20L".to_string(),
            units_per_case: units,
            distributor_cost_with_tax: cost,
            retail_price_with_tax: retail,
            wholesale_case_price: case,
        },
    )
}

fn one_cent() -> Money {
    Money::from_cents(1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn retail_price_is_stored_price(
        product in product_strategy(),
        tax in tax_strategy(),
        margin in proptest::option::of(margin_strategy()),
    ) {
        let price = compute_unit_price(&product, PricingMode::Retail, tax, margin).unwrap();
        prop_assert_eq!(price, product.retail_price_with_tax);
    }

    #[test]
    fn wholesale_price_follows_margin_formula(
        product in product_strategy(),
        tax in tax_strategy(),
        margin in margin_strategy(),
    ) {
        let price = compute_unit_price(&product, PricingMode::Wholesale, tax, Some(margin)).unwrap();
        let f = tax.factor();
        let expected = (product.distributor_cost_with_tax.amount() / f)
            * (Decimal::ONE + margin / Decimal::ONE_HUNDRED)
            * f;
        prop_assert_eq!(price.amount(), expected);
    }

    #[test]
    fn zero_margin_gives_back_cost(product in product_strategy(), tax in tax_strategy()) {
        let price =
            compute_unit_price(&product, PricingMode::Wholesale, tax, Some(Decimal::ZERO)).unwrap();
        let drift = (price - product.distributor_cost_with_tax).abs();
        prop_assert!(drift < Money::new(Decimal::new(1, 6)), "drift {}", drift.amount());
        prop_assert_eq!(price.rounded(), product.distributor_cost_with_tax.rounded());
    }

    #[test]
    fn negative_margin_always_fails(
        product in product_strategy(),
        tax in tax_strategy(),
        hundredths in 1i64..1_000_000,
    ) {
        let margin = -Decimal::new(hundredths, 2);
        let result = compute_unit_price(&product, PricingMode::Wholesale, tax, Some(margin));
        let is_negative_margin = matches!(result, Err(PricingError::NegativeMargin { .. }));
        prop_assert!(is_negative_margin);
    }

    #[test]
    fn missing_margin_always_fails(product in product_strategy(), tax in tax_strategy()) {
        let result = compute_unit_price(&product, PricingMode::Wholesale, tax, None);
        prop_assert_eq!(result, Err(PricingError::MissingMargin));
    }

    #[test]
    fn totals_are_consistent(
        lines in proptest::collection::vec(
            (product_strategy(), 1i64..=999, proptest::bool::ANY, margin_strategy()),
            0..12,
        ),
        tax in tax_strategy(),
    ) {
        let mut quote = Quotation::new(tax);
        for (product, qty, wholesale, margin) in &lines {
            let mode = if *wholesale { PricingMode::Wholesale } else { PricingMode::Retail };
            quote.add_line(product, *qty, mode, Some(*margin)).unwrap();
        }

        let totals = quote.totals();
        let sum: Money = quote.line_items().iter().map(|l| l.subtotal).sum();
        prop_assert_eq!(totals.grand_total, sum);
        prop_assert_eq!(totals.tax_amount, totals.grand_total - totals.pretax_subtotal);

        let back = tax.apply(totals.pretax_subtotal);
        prop_assert!((back - totals.grand_total).abs() <= one_cent());

        // Rounded grand total is within a cent per line of the sum of the
        // rounded subtotals shown on screen.
        let shown: Money = quote.line_items().iter().map(|l| l.subtotal.rounded()).sum();
        let tolerance = Money::from_cents(lines.len().max(1) as i64);
        prop_assert!((shown - totals.grand_total.rounded()).abs() <= tolerance);
    }

    #[test]
    fn clear_resets_everything(
        lines in proptest::collection::vec((product_strategy(), 1i64..=999), 1..6),
    ) {
        let mut quote = Quotation::default();
        quote.set_client_name("Cliente");
        for (product, qty) in &lines {
            quote.add_line(product, *qty, PricingMode::Retail, None).unwrap();
        }
        quote.clear();
        prop_assert!(quote.totals().is_zero());
        prop_assert!(quote.line_items().is_empty());
        prop_assert_eq!(quote.client_name(), "");
    }

    #[test]
    fn upsert_existing_id_keeps_position(
        count in 1usize..8,
        pick in 0usize..8,
        price in money_strategy(),
    ) {
        let mut catalog = Catalog::new();
        for i in 0..count {
            catalog.upsert(ProductInput {
                id: None,
                name: format!("Producto {}", i),
                units_per_case: 1,
                distributor_cost_with_tax: price,
                retail_price_with_tax: price,
                wholesale_case_price: price,
            }).unwrap();
        }
        let index = pick % count;
        let id = catalog.products()[index].id;

        let returned = catalog.upsert(ProductInput {
            id: Some(id),
            name: "Reemplazo".to_string(),
            units_per_case: 6,
            distributor_cost_with_tax: price,
            retail_price_with_tax: price,
            wholesale_case_price: price,
        }).unwrap();

        prop_assert_eq!(returned, id);
        prop_assert_eq!(catalog.len(), count);
        prop_assert_eq!(catalog.products()[index].id, id);
        prop_assert_eq!(&catalog.products()[index].name, "Reemplazo");

        let next = catalog.next_id().unwrap();
        let appended = catalog.upsert(ProductInput {
            id: None,
            name: "Nuevo".to_string(),
            units_per_case: 0,
            distributor_cost_with_tax: price,
            retail_price_with_tax: price,
            wholesale_case_price: price,
        }).unwrap();
        prop_assert_eq!(appended, next);
        prop_assert_eq!(catalog.len(), count + 1);
    }
}
