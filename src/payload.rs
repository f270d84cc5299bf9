//! Payload
//!
//! Builds [`CartEvent`]s from cart snapshots.

use crate::{
    cart::Cart,
    events::{CartData, CartEvent, EventAction, GrandTotal, LineItem},
    items::CartItem,
    pricing::{format_amount, money_to_f64, sum_amounts, sum_amounts_plain},
    products::Product,
};

/// Path of the WooCommerce placeholder image, relative to the site URL.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/wp-content/plugins/woocommerce/assets/images/placeholder.png";

/// Store-wide values needed to render cart lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContext {
    /// Absolute URL of the image used for products without one
    pub placeholder_image_url: String,
}

impl StoreContext {
    /// Store context for a site, using the stock WooCommerce placeholder image.
    pub fn for_site(site_url: &str) -> Self {
        Self {
            placeholder_image_url: format!(
                "{}{PLACEHOLDER_IMAGE_PATH}",
                site_url.trim_end_matches('/')
            ),
        }
    }
}

/// Build the cart event for a cart snapshot.
///
/// Empty carts produce an empty `cart_data` and a numeric `grand_total` of `0`.
pub fn build_cart_event(
    cart: &Cart,
    customer_email: &str,
    session: &str,
    store: &StoreContext,
) -> CartEvent {
    let currency = cart.currency();

    let cart_data: CartData = cart
        .items()
        .iter()
        .map(|item| (item.key().to_string(), line_item(item, store)))
        .collect();

    let grand_total = if cart.is_empty() {
        GrandTotal::Empty
    } else {
        GrandTotal::Amount(sum_amounts(
            cart.items().iter().map(CartItem::line_total),
            currency,
        ))
    };

    let total_taxes = sum_amounts_plain(cart.items().iter().map(CartItem::line_tax));

    let adjustments = cart.adjustments();

    CartEvent {
        event_action: EventAction::Updated,
        session: session.to_string(),
        customer_email: customer_email.to_string(),
        cart_data,
        grand_total,
        total_discounts: format_amount(money_to_f64(&adjustments.discounts)),
        total_taxes,
        total_fees: format_amount(money_to_f64(&adjustments.fees)),
        total_shipping: format_amount(money_to_f64(&adjustments.shipping)),
        currency: currency.iso_alpha_code.to_string(),
    }
}

/// Render a single cart line.
pub fn line_item(item: &CartItem, store: &StoreContext) -> LineItem {
    let product = item.product();

    LineItem {
        product_id: product.id,
        product_variant_id: product.variant_id(),
        sku: product.sku.clone(),
        name: product.name.clone(),
        quantity: item.quantity(),
        price: format_amount(money_to_f64(&product.price)),
        taxes: format_amount(item.line_tax()),
        total: format_amount(item.line_total()),
        product_url: product.permalink.clone(),
        image_url: image_html(product, store),
        categories: product.categories.to_vec(),
    }
}

/// Render the `<img>` tag for a product, falling back to the placeholder image.
pub fn image_html(product: &Product, store: &StoreContext) -> String {
    match &product.image_url {
        Some(src) => format!(
            "<img width=\"300\" height=\"300\" src=\"{}\" class=\"attachment-woocommerce_thumbnail size-woocommerce_thumbnail\" alt=\"{}\" />",
            escape_attr(src),
            escape_attr(&product.name)
        ),
        None => format!(
            "<img src=\"{}\" alt=\"Placeholder\" width=\"300\" class=\"woocommerce-placeholder wp-post-image\" height=\"300\" />",
            escape_attr(&store.placeholder_image_url)
        ),
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        cart::CartAdjustments,
        items::CartItemKey,
        products::ProductId,
    };

    use super::*;

    const SESSION: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn store() -> StoreContext {
        StoreContext::for_site("http://localhost:3007/")
    }

    fn widget() -> Product {
        Product::new(ProductId::new(6), "My Fair Widget", Money::from_minor(1099, iso::GBP))
            .with_sku("fair-widg-12345")
            .with_permalink("http://localhost:3007/?product=fair-widget")
            .with_category("my fair category")
    }

    fn gizmo() -> Product {
        Product::new(ProductId::new(7), "My Fair Gizmo", Money::from_minor(1111, iso::GBP))
            .with_sku("fair-gzmo-67890")
            .with_permalink("http://localhost:3007/?product=fair-gizmo")
            .with_category("my fair category")
    }

    #[test]
    fn store_context_builds_placeholder_url() {
        assert_eq!(
            store().placeholder_image_url,
            "http://localhost:3007/wp-content/plugins/woocommerce/assets/images/placeholder.png"
        );
    }

    #[test]
    fn single_line_event() -> TestResult {
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget(), 1)?;

        let event = build_cart_event(&cart, "myfairuser@example.com", SESSION, &store());
        let key = CartItemKey::for_product(&widget());
        let line = event.cart_data.get(key.as_str()).ok_or("missing widget line")?;

        assert_eq!(event.event_action, EventAction::Updated);
        assert_eq!(event.session, SESSION);
        assert_eq!(event.customer_email, "myfairuser@example.com");
        assert_eq!(event.grand_total, GrandTotal::Amount("10.99".to_string()));
        assert_eq!(event.currency, "GBP");
        assert_eq!(event.total_discounts, "0");
        assert_eq!(event.total_taxes, "0");
        assert_eq!(event.total_fees, "0");
        assert_eq!(event.total_shipping, "0");

        assert_eq!(line.product_id, ProductId::new(6));
        assert_eq!(line.product_variant_id, ProductId::new(6));
        assert_eq!(line.sku, "fair-widg-12345");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.price, "10.99");
        assert_eq!(line.taxes, "0");
        assert_eq!(line.total, "10.99");
        assert_eq!(line.categories, ["my fair category"]);
        assert!(line.image_url.contains("<img"));
        assert!(line.image_url.contains(&store().placeholder_image_url));

        Ok(())
    }

    #[test]
    fn two_lines_sum_to_exact_decimal() -> TestResult {
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget(), 1)?;
        cart.add(gizmo(), 1)?;

        let event = build_cart_event(&cart, "", SESSION, &store());

        assert_eq!(event.cart_data.len(), 2);
        assert_eq!(event.grand_total.as_str(), "22.10");

        Ok(())
    }

    #[test]
    fn large_quantity_uses_naive_multiplication() -> TestResult {
        let mut cart = Cart::new(iso::GBP);
        let key = CartItemKey::for_product(&widget());

        cart.add(widget(), 1)?;
        cart.set_quantity(&key, 9001)?;

        let event = build_cart_event(&cart, "", SESSION, &store());
        let line = event.cart_data.get(key.as_str()).ok_or("missing widget line")?;

        assert_eq!(line.quantity, 9001);
        assert_eq!(line.total, (10.99_f64 * 9001.0).to_string());

        Ok(())
    }

    #[test]
    fn empty_cart_event_keeps_every_field() -> TestResult {
        let cart = Cart::new(iso::GBP);

        let event = build_cart_event(&cart, "myfairuser@example.com", SESSION, &store());
        let value = serde_json::to_value(&event)?;

        for field in [
            "event_action",
            "session",
            "customer_email",
            "cart_data",
            "grand_total",
            "total_discounts",
            "total_taxes",
            "total_fees",
            "total_shipping",
            "currency",
        ] {
            assert!(
                value.get(field).is_some_and(|v| !v.is_null()),
                "missing {field}"
            );
        }

        assert_eq!(value["grand_total"], serde_json::json!(0));
        assert_eq!(value["cart_data"], serde_json::json!({}));

        Ok(())
    }

    #[test]
    fn taxes_and_adjustments_are_reported() -> TestResult {
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget().with_tax(Money::from_minor(220, iso::GBP)), 2)?;
        cart.set_adjustments(CartAdjustments {
            discounts: Money::from_minor(100, iso::GBP),
            fees: Money::from_minor(50, iso::GBP),
            shipping: Money::from_minor(399, iso::GBP),
        });

        let event = build_cart_event(&cart, "", SESSION, &store());
        let line = event.cart_data.values().next().ok_or("missing line")?;

        assert_eq!(line.taxes, "4.4");
        assert_eq!(event.total_taxes, "4.4");
        assert_eq!(event.total_discounts, "1");
        assert_eq!(event.total_fees, "0.5");
        assert_eq!(event.total_shipping, "3.99");

        Ok(())
    }

    #[test]
    fn total_taxes_is_an_exact_sum_of_line_taxes() -> TestResult {
        let mut cart = Cart::new(iso::GBP);

        cart.add(widget().with_tax(Money::from_minor(10, iso::GBP)), 1)?;
        cart.add(gizmo().with_tax(Money::from_minor(20, iso::GBP)), 1)?;

        let event = build_cart_event(&cart, "", SESSION, &store());
        let taxes: Vec<_> = event.cart_data.values().map(|line| line.taxes.as_str()).collect();

        assert_eq!(taxes, ["0.1", "0.2"]);
        assert_eq!(event.total_taxes, "0.3");

        Ok(())
    }

    #[test]
    fn product_image_is_escaped() {
        let product = widget()
            .with_image_url("http://localhost:3007/img.png?a=1&b=2")
            .with_category("x");
        let product = Product {
            name: "Widget \"Deluxe\"".to_string(),
            ..product
        };

        let html = image_html(&product, &store());

        assert!(html.starts_with("<img "));
        assert!(html.contains("src=\"http://localhost:3007/img.png?a=1&amp;b=2\""));
        assert!(html.contains("alt=\"Widget &quot;Deluxe&quot;\""));
    }
}
