//! End-to-end tests for the `edit/getReferencedTables` handler: validation
//! ordering, null normalization, and order preservation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rowedit::edit::protocol::codes;
use rowedit::{
    EditDataService, EditSession, EditTableMetadata, GetReferencedTablesParams,
    GetReferencedTablesResult, ReferencedTableInfo, RequestContext, SessionRegistry,
};

const TEST_OWNER_URI: &str = "test://referenced-tables";

/// Recorded handler outcome.
#[derive(Debug)]
enum Outcome {
    Result(GetReferencedTablesResult),
    Error {
        message: String,
        code: i64,
        data: Option<serde_json::Value>,
    },
}

/// Recording double for the response channel.
#[derive(Default)]
struct RecordingContext {
    outcomes: Mutex<Vec<Outcome>>,
}

impl RecordingContext {
    async fn single_outcome(self) -> Outcome {
        let mut outcomes = self.outcomes.into_inner();
        assert_eq!(outcomes.len(), 1, "handler must emit exactly one outcome");
        outcomes.remove(0)
    }
}

#[async_trait]
impl RequestContext<GetReferencedTablesResult> for RecordingContext {
    async fn send_result(&self, result: GetReferencedTablesResult) {
        self.outcomes.lock().await.push(Outcome::Result(result));
    }

    async fn send_error(&self, message: &str, code: i64, data: Option<serde_json::Value>) {
        self.outcomes.lock().await.push(Outcome::Error {
            message: message.to_string(),
            code,
            data,
        });
    }
}

fn referenced_table(
    schema: &str,
    table: &str,
    fk: &str,
    source: &[&str],
    referenced: &[&str],
) -> ReferencedTableInfo {
    ReferencedTableInfo {
        schema_name: schema.to_string(),
        table_name: table.to_string(),
        fully_qualified_name: format!("{schema}.{table}"),
        foreign_key_name: fk.to_string(),
        source_columns: source.iter().map(|s| s.to_string()).collect(),
        referenced_columns: referenced.iter().map(|s| s.to_string()).collect(),
    }
}

fn service_with_metadata(referenced_tables: Option<Vec<ReferencedTableInfo>>) -> EditDataService {
    let metadata = EditTableMetadata {
        schema_name: "dbo".to_string(),
        table_name: "Orders".to_string(),
        referenced_tables,
    };
    let registry = Arc::new(SessionRegistry::new());
    registry.register(EditSession::initialized(TEST_OWNER_URI, metadata));
    EditDataService::new(registry)
}

fn params(owner_uri: &str) -> GetReferencedTablesParams {
    GetReferencedTablesParams {
        owner_uri: owner_uri.to_string(),
    }
}

#[tokio::test]
async fn success_with_referenced_tables() {
    let service = service_with_metadata(Some(vec![
        referenced_table("dbo", "Products", "FK_Orders_Products", &["ProductId"], &["Id"]),
        referenced_table("dbo", "Customers", "FK_Orders_Customers", &["CustomerId"], &["Id"]),
    ]));

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Result(result) => {
            assert_eq!(result.referenced_tables.len(), 2);
            assert_eq!(result.referenced_tables[0].fully_qualified_name, "dbo.Products");
            assert_eq!(result.referenced_tables[0].foreign_key_name, "FK_Orders_Products");
            assert_eq!(result.referenced_tables[1].fully_qualified_name, "dbo.Customers");
            assert_eq!(result.referenced_tables[1].foreign_key_name, "FK_Orders_Customers");
        }
        other => panic!("expected result, got {other:?}"),
    }
}

#[tokio::test]
async fn success_with_no_referenced_tables() {
    let service = service_with_metadata(Some(vec![]));

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Result(result) => assert!(result.referenced_tables.is_empty()),
        other => panic!("expected result, got {other:?}"),
    }
}

#[tokio::test]
async fn success_with_unset_referenced_tables() {
    // Producer never populated the field; callers still get [] rather than
    // an error or a null.
    let service = service_with_metadata(None);

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Result(result) => assert!(result.referenced_tables.is_empty()),
        other => panic!("expected result, got {other:?}"),
    }
}

#[tokio::test]
async fn session_not_found() {
    let service = service_with_metadata(None);

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params("nonexistent://uri"), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Error { code, data, .. } => {
            assert_eq!(code, codes::SESSION_NOT_FOUND);
            assert_eq!(data.unwrap()["ownerUri"], "nonexistent://uri");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_owner_uri() {
    let service = service_with_metadata(None);

    let context = RecordingContext::default();
    service.handle_get_referenced_tables(params(""), &context).await;

    match context.single_outcome().await {
        Outcome::Error { message, code, .. } => {
            assert_eq!(code, codes::INVALID_PARAMS);
            assert!(message.contains("ownerUri"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_owner_uri_wins_even_with_empty_registry() {
    // Validation order is fixed: the parameter check fires before any
    // registry lookup.
    let service = EditDataService::new(Arc::new(SessionRegistry::new()));

    let context = RecordingContext::default();
    service.handle_get_referenced_tables(params(""), &context).await;

    match context.single_outcome().await {
        Outcome::Error { code, .. } => assert_eq!(code, codes::INVALID_PARAMS),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn session_not_initialized() {
    let registry = Arc::new(SessionRegistry::new());
    registry.register(EditSession::new(TEST_OWNER_URI));
    let service = EditDataService::new(registry);

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Error { message, code, .. } => {
            assert_eq!(code, codes::SESSION_NOT_INITIALIZED);
            assert!(message.contains("not initialized"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn composite_foreign_keys_round_trip() {
    let service = service_with_metadata(Some(vec![
        referenced_table(
            "sales",
            "OrderDetails",
            "FK_Complex_Composite",
            &["OrderId", "ProductId", "CustomerId"],
            &["Id", "ProdId", "CustId"],
        ),
        referenced_table("inventory", "Warehouses", "FK_Single_Warehouse", &["WarehouseId"], &["Id"]),
    ]));

    let context = RecordingContext::default();
    service
        .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
        .await;

    match context.single_outcome().await {
        Outcome::Result(result) => {
            assert_eq!(result.referenced_tables.len(), 2);

            let composite = &result.referenced_tables[0];
            assert_eq!(composite.schema_name, "sales");
            assert_eq!(composite.table_name, "OrderDetails");
            assert_eq!(composite.source_columns.len(), 3);
            assert_eq!(composite.referenced_columns.len(), 3);
            assert!(composite.is_well_formed());
            // Per-position pairing is preserved, not just membership
            let pairs: Vec<_> = composite.column_pairs().collect();
            assert_eq!(
                pairs,
                vec![
                    ("OrderId", "Id"),
                    ("ProductId", "ProdId"),
                    ("CustomerId", "CustId")
                ]
            );

            let single = &result.referenced_tables[1];
            assert_eq!(single.schema_name, "inventory");
            assert_eq!(single.table_name, "Warehouses");
            assert_eq!(single.source_columns, vec!["WarehouseId"]);
        }
        other => panic!("expected result, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_queries_on_one_session() {
    let service = Arc::new(service_with_metadata(Some(vec![referenced_table(
        "dbo",
        "Products",
        "FK_Orders_Products",
        &["ProductId"],
        &["Id"],
    )])));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let context = RecordingContext::default();
            service
                .handle_get_referenced_tables(params(TEST_OWNER_URI), &context)
                .await;
            match context.single_outcome().await {
                Outcome::Result(result) => result.referenced_tables.len(),
                other => panic!("expected result, got {other:?}"),
            }
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 1);
    }
}
