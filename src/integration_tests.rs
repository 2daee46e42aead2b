#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::app_system::InventixSystem;
    use crate::backend::{ApiReply, HttpBackend};
    use crate::config::Settings;
    use crate::domain::{Customer, Product};
    use crate::mock_framework::{MockBackend, RecordedCall};
    use crate::shell::Shell;

    fn stocked_backend() -> MockBackend {
        MockBackend::new()
            .with_customers(vec![Customer::new("C1", "Ana Torres")])
            .with_products(vec![
                Product::new("P1", "Cafe", dec!(10.00), 5),
                Product::new("P2", "Te", dec!(4.50), 10),
            ])
    }

    async fn run_session(backend: Arc<MockBackend>, script: &'static str) -> String {
        let system = InventixSystem::new(&Settings::default(), backend);
        system.sale_client.load_catalog().await.unwrap();

        let shell = Shell::new(
            system.sale_client.clone(),
            system.registry.clone(),
            script.as_bytes(),
            Vec::new(),
        );
        let output = shell.run().await.unwrap();
        system.shutdown().await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_sale_flow_through_shell() {
        let backend = Arc::new(stocked_backend());
        let script = "\
invoice FAC-00009
customer C1
product P1
add 6
add 3
product P2
add 2
product P1
add 1
remove 3
submit
quit
";
        let output = run_session(backend.clone(), script).await;

        // 6 > stock of 5
        assert!(output.contains("! Insufficient stock: requested 6, available 5"));
        assert!(output.contains("Total: 30.00"));
        assert!(output.contains("Total: 39.00"));
        assert!(output.contains("Total: 49.00"));
        assert!(output.contains("Venta registrada correctamente"));
        assert!(output.contains("Invoice: FAC-00010"));

        let sales = backend.submitted_sales();
        assert_eq!(sales.len(), 1);
        let sale = &sales[0];
        assert_eq!(sale.invoice_number, "FAC-00009");
        assert_eq!(sale.customer_id, "C1");
        assert_eq!(sale.total, dec!(39.00));
        let items: Vec<(&str, u32)> = sale.items.iter().map(|i| (i.product_id.as_str(), i.quantity)).collect();
        assert_eq!(items, vec![("P1", 3), ("P2", 2)]);

        // initial load plus the reload after the sale
        assert_eq!(backend.product_fetches(), 2);
    }

    #[tokio::test]
    async fn test_rejected_sale_keeps_cart() {
        let backend = Arc::new(stocked_backend().with_sale_reply(Ok(ApiReply::failed("Stock insuficiente"))));
        let script = "customer C1\nproduct P2\nadd 4\nsubmit\nshow\nquit\n";
        let output = run_session(backend.clone(), script).await;

        assert!(output.contains("Error: Sale rejected: Stock insuficiente"));
        assert!(output.ends_with("Total: 18.00\n> "));
        assert_eq!(backend.product_fetches(), 1);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation_and_reloads_catalog() {
        let backend = Arc::new(stocked_backend().with_product_reply(ApiReply::ok("Producto eliminado")));
        let script = "product-rm P1\nn\nproduct-rm P2\ny\nquit\n";
        let output = run_session(backend.clone(), script).await;

        assert!(output.contains("Delete product P1? [y/N]"));
        assert!(output.contains("Producto eliminado"));

        let deletes: Vec<RecordedCall> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, RecordedCall::DeleteProduct(_)))
            .collect();
        assert_eq!(deletes, vec![RecordedCall::DeleteProduct("P2".into())]);
        assert_eq!(backend.product_fetches(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_never_leaves_the_terminal() {
        let backend = Arc::new(stocked_backend());
        let script = "customer-add Ana|0102|0991|ana.example.com|Centro\nproduct-add Cafe||-1|5|Andes\nquit\n";
        let output = run_session(backend.clone(), script).await;

        assert_eq!(output.matches("! Invalid form:").count(), 2);
        assert!(!backend
            .calls()
            .iter()
            .any(|c| matches!(c, RecordedCall::CreateCustomer(_) | RecordedCall::CreateProduct(_))));
    }

    #[tokio::test]
    async fn test_catalog_outage_does_not_block_the_session() {
        let backend = Arc::new(
            stocked_backend().failing_products(crate::error::ApiError::Transport("connection refused".into())),
        );
        let output = run_session(backend, "customer C1\nproduct P1\nquit\n").await;

        assert!(output.contains("Client: Ana Torres (C1)"));
        assert!(output.contains("! Unknown product: P1"));
    }

    #[tokio::test]
    async fn test_sale_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nombre": "Ana Torres", "cedula": "0102", "celular": "0991",
                 "email": "ana@example.com", "direccion": "Centro"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/productos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "nombre": "Cafe", "precio": 10.0, "stock": 5},
                {"id": 8, "nombre": "Te", "precio": 4.5, "stock": 10}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ventas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "Venta registrada correctamente"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut settings = Settings::default();
        settings.backend.base_url = server.uri();
        let backend = HttpBackend::new(&settings.backend).unwrap();
        let system = InventixSystem::new(&settings, Arc::new(backend));
        let client = system.sale_client.clone();

        let summary = client.load_catalog().await.unwrap();
        assert_eq!((summary.customers, summary.products), (1, 2));

        client.set_invoice_number("FAC-00001".into()).await.unwrap();
        client.select_customer("1".into()).await.unwrap();
        client.select_product("7".into()).await.unwrap();
        client.set_quantity(3).await.unwrap();
        client.add_line_item().await.unwrap();
        client.select_product("8".into()).await.unwrap();
        client.set_quantity(2).await.unwrap();
        let view = client.add_line_item().await.unwrap();
        assert_eq!(view.formatted_total(), "39.00");

        let receipt = client.submit().await.unwrap();
        assert_eq!(receipt.message, "Venta registrada correctamente");
        assert_eq!(receipt.view.invoice_number, "FAC-00002");

        let requests = server.received_requests().await.unwrap();
        let sale = requests.iter().find(|r| r.url.path() == "/api/ventas").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&sale.body).unwrap();
        assert_eq!(body["numero_factura"], "FAC-00001");
        assert_eq!(body["cliente_id"], "1");
        assert_eq!(body["total"], 39.0);
        assert_eq!(body["items"][0]["producto_id"], "7");
        assert_eq!(body["items"][0]["cantidad"], 3);
        assert_eq!(body["items"][1]["subtotal"], 9.0);

        system.shutdown().await.unwrap();
    }
}
