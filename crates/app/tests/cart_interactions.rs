//! Cart interaction scenarios, delivered to a mock webhook endpoint over HTTP.

use std::sync::Arc;

use dripcart::{
    items::CartItemKey,
    products::{Product, ProductId},
};
use dripcart_app::{
    context::{AppConfig, AppContext},
    domain::{
        shoppers::Shopper,
        webhooks::{
            CART_EVENT_TOPIC, HookshotConfig, HttpWebhookTransport, NewWebhook, WebhookEnvelope,
            WebhookStatus, signature,
        },
    },
};
use rusty_money::{Money, iso};
use serde_json::{Value, json};
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path},
};

const ENDPOINT: &str = "/my_fair_endpoint";
const SECRET: &str = "my fair secret";
const EMAIL: &str = "myfairuser@example.com";

struct Scenario {
    server: MockServer,
    ctx: AppContext,
    seen: usize,
}

impl Scenario {
    async fn new() -> TestResult<Self> {
        Self::with_status(202).await
    }

    async fn with_status(status: u16) -> TestResult<Self> {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let hookshot = HookshotConfig::default();
        let config = AppConfig {
            currency: iso::GBP,
            hookshot: hookshot.clone(),
            products: vec![widget(), gizmo()],
            webhook: Some(NewWebhook {
                name: "My Fair Webhook".to_string(),
                topic: CART_EVENT_TOPIC.parse()?,
                delivery_url: format!("{}{ENDPOINT}", server.uri()),
                secret: SECRET.to_string(),
            }),
        };

        let ctx = AppContext::with_transport(config, Arc::new(HttpWebhookTransport::new(hookshot)))?;

        Ok(Self {
            server,
            ctx,
            seen: 0,
        })
    }

    fn shopper() -> Shopper {
        Shopper::new("my_fair_user", EMAIL)
    }

    /// Requests received since the last call.
    async fn new_requests(&mut self) -> Vec<Request> {
        let requests = self.server.received_requests().await.unwrap_or_default();
        let fresh = requests.into_iter().skip(self.seen).collect::<Vec<_>>();

        self.seen += fresh.len();

        fresh
    }

    /// Expect exactly one webhook since the last call and return its cart event.
    async fn single_event(&mut self) -> TestResult<Value> {
        let requests = self.new_requests().await;

        assert_eq!(requests.len(), 1, "expected exactly one webhook");

        let request = requests.first().ok_or("no webhook received")?;

        assert_hookshot_headers(request)?;

        let envelope: WebhookEnvelope = serde_json::from_slice(&request.body)?;

        assert_eq!(envelope.action, "wc_drip_woocommerce_cart_event");

        Ok(serde_json::to_value(envelope.decode_event()?)?)
    }

    async fn add(&self, product: u64) -> TestResult {
        self.ctx
            .carts
            .add_item(Self::shopper(), ProductId::new(product), 1)
            .await?;

        Ok(())
    }
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

fn header<'a>(request: &'a Request, name: &str) -> TestResult<&'a str> {
    Ok(request
        .headers
        .get(name)
        .ok_or_else(|| format!("missing {name} header"))?
        .to_str()?)
}

fn assert_hookshot_headers(request: &Request) -> TestResult {
    let user_agent = header(request, "user-agent")?;

    assert!(
        user_agent.starts_with("WooCommerce/") && user_agent.contains("Hookshot (WordPress/"),
        "unexpected user agent {user_agent}"
    );
    assert_eq!(header(request, "x-wc-webhook-topic")?, CART_EVENT_TOPIC);
    assert!(
        signature::verify(&request.body, SECRET, header(request, "x-wc-webhook-signature")?),
        "signature should match the body"
    );

    Ok(())
}

fn assert_event_basics(event: &Value) {
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
            event.get(field).is_some_and(|value| !value.is_null()),
            "{field} should be present"
        );
    }

    assert_eq!(event["event_action"], "updated");
    assert_eq!(event["customer_email"], EMAIL);
    assert_eq!(event["currency"], "GBP");
    assert_eq!(event["total_discounts"], "0");
    assert_eq!(event["total_taxes"], "0");
    assert_eq!(event["total_fees"], "0");
    assert_eq!(event["total_shipping"], "0");
}

fn line_for(event: &Value, product_id: u64) -> TestResult<Value> {
    Ok(event["cart_data"]
        .as_object()
        .ok_or("cart_data should be an object")?
        .values()
        .find(|line| line["product_id"] == json!(product_id))
        .cloned()
        .ok_or("product missing from cart_data")?)
}

fn session(event: &Value) -> TestResult<String> {
    let session = event["session"].as_str().ok_or("session should be a string")?;

    assert_eq!(session.len(), 64);

    Ok(session.to_string())
}

fn widget_key() -> CartItemKey {
    CartItemKey::for_product(&widget())
}

#[tokio::test]
async fn adding_a_product_sends_a_webhook() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;

    let event = scenario.single_event().await?;
    let line = line_for(&event, 6)?;

    assert_event_basics(&event);
    assert_eq!(event["cart_data"].as_object().map(|lines| lines.len()), Some(1));
    assert_eq!(event["grand_total"], "10.99");

    assert_eq!(line["product_variant_id"], 6);
    assert_eq!(line["sku"], "fair-widg-12345");
    assert_eq!(line["name"], "My Fair Widget");
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["price"], "10.99");
    assert_eq!(line["taxes"], "0");
    assert_eq!(line["total"], "10.99");
    assert_eq!(line["product_url"], "http://localhost:3007/?product=fair-widget");
    assert_eq!(line["categories"], json!(["my fair category"]));

    let image = line["image_url"].as_str().ok_or("image_url should be a string")?;

    assert!(image.contains("<img"), "image_url should be an img tag");
    assert!(
        image.contains(
            "http://localhost:3007/wp-content/plugins/woocommerce/assets/images/placeholder.png"
        ),
        "image_url should use the placeholder"
    );

    Ok(())
}

#[tokio::test]
async fn removing_the_only_product_sends_an_empty_cart() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.new_requests().await;

    scenario
        .ctx
        .carts
        .remove_item(Scenario::shopper(), widget_key())
        .await?;

    let event = scenario.single_event().await?;

    assert_event_basics(&event);
    assert_eq!(event["cart_data"], json!({}));
    assert_eq!(event["grand_total"], json!(0));

    Ok(())
}

#[tokio::test]
async fn restoring_a_product_sends_nothing() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.add(7).await?;
    scenario
        .ctx
        .carts
        .remove_item(Scenario::shopper(), widget_key())
        .await?;
    scenario.new_requests().await;

    let cart = scenario
        .ctx
        .carts
        .restore_item(Scenario::shopper(), widget_key())
        .await?;

    assert_eq!(cart.len(), 2);
    assert!(scenario.new_requests().await.is_empty(), "restore should not send a webhook");

    Ok(())
}

#[tokio::test]
async fn removing_a_restored_last_product_sends_an_empty_cart() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.new_requests().await;

    scenario
        .ctx
        .carts
        .remove_item(Scenario::shopper(), widget_key())
        .await?;
    let removed = session(&scenario.single_event().await?)?;

    scenario
        .ctx
        .carts
        .restore_item(Scenario::shopper(), widget_key())
        .await?;

    assert!(scenario.new_requests().await.is_empty(), "restore should not send a webhook");

    scenario
        .ctx
        .carts
        .remove_item(Scenario::shopper(), widget_key())
        .await?;

    let event = scenario.single_event().await?;

    assert_event_basics(&event);
    assert_eq!(event["cart_data"], json!({}));
    assert_eq!(event["grand_total"], json!(0));
    assert_ne!(session(&event)?, removed, "the ended session is not reopened by a restore");

    Ok(())
}

#[tokio::test]
async fn emptying_an_empty_cart_sends_nothing() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.ctx.carts.empty_cart(Scenario::shopper()).await?;

    assert!(scenario.new_requests().await.is_empty(), "nothing to report for an empty cart");

    Ok(())
}

#[tokio::test]
async fn increasing_the_quantity_sends_the_new_totals() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.new_requests().await;

    scenario
        .ctx
        .carts
        .update_quantity(Scenario::shopper(), widget_key(), 9001)
        .await?;

    let event = scenario.single_event().await?;
    let line = line_for(&event, 6)?;

    assert_event_basics(&event);
    assert_eq!(line["quantity"], 9001);
    assert_eq!(line["total"], json!((10.99_f64 * 9001.0).to_string()));
    assert_eq!(event["grand_total"], json!((10.99_f64 * 9001.0).to_string()));

    Ok(())
}

#[tokio::test]
async fn decreasing_the_quantity_to_zero_sends_an_empty_cart() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.new_requests().await;

    scenario
        .ctx
        .carts
        .update_quantity(Scenario::shopper(), widget_key(), 0)
        .await?;

    let event = scenario.single_event().await?;

    assert_eq!(event["cart_data"], json!({}));
    assert_eq!(event["grand_total"], json!(0));

    Ok(())
}

#[tokio::test]
async fn two_products_sum_to_an_exact_grand_total() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    scenario.new_requests().await;
    scenario.add(7).await?;

    let event = scenario.single_event().await?;
    let gizmo = line_for(&event, 7)?;

    assert_event_basics(&event);
    assert_eq!(event["cart_data"].as_object().map(|lines| lines.len()), Some(2));
    assert_eq!(event["grand_total"], "22.10");
    assert_eq!(gizmo["sku"], "fair-gzmo-67890");
    assert_eq!(gizmo["price"], "11.11");
    assert_eq!(gizmo["product_url"], "http://localhost:3007/?product=fair-gizmo");

    Ok(())
}

#[tokio::test]
async fn session_persists_until_the_cart_empties() -> TestResult {
    let mut scenario = Scenario::new().await?;

    scenario.add(6).await?;
    let first = session(&scenario.single_event().await?)?;

    scenario.add(7).await?;
    let second = session(&scenario.single_event().await?)?;

    assert_eq!(first, second, "consecutive adds share a session");

    scenario.ctx.carts.empty_cart(Scenario::shopper()).await?;
    let emptied = session(&scenario.single_event().await?)?;

    assert_eq!(emptied, first, "the emptied cart still reports its session");

    scenario.add(6).await?;
    let renewed = session(&scenario.single_event().await?)?;

    assert_ne!(renewed, first, "a new cart starts a new session");

    Ok(())
}

#[tokio::test]
async fn failing_endpoint_does_not_break_the_cart() -> TestResult {
    let mut scenario = Scenario::with_status(500).await?;

    for _ in 0..5 {
        scenario
            .ctx
            .carts
            .add_item(Scenario::shopper(), ProductId::new(6), 1)
            .await?;
    }

    assert_eq!(scenario.new_requests().await.len(), 5);

    let webhook = scenario
        .ctx
        .webhooks
        .list()
        .into_iter()
        .next()
        .ok_or("webhook should be registered")?;

    assert_eq!(webhook.status, WebhookStatus::Disabled);

    scenario.add(7).await?;

    assert!(scenario.new_requests().await.is_empty(), "disabled webhook receives nothing");
    assert_eq!(
        scenario.ctx.carts.get_cart(Scenario::shopper().id).await?.len(),
        2
    );

    Ok(())
}
