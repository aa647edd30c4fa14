use super::*;

fn product(n: u32, title: &str) -> Product {
    Product {
        id: ProductId::parse(&n.to_string()).expect("id"),
        title: title.to_string(),
        description: None,
        thumbnail_url: None,
        status: None,
    }
}

fn catalog(count: u32) -> MemoryCatalog {
    MemoryCatalog::new(
        (1..=count)
            .map(|n| product(n, &format!("Product {n:02}")))
            .collect(),
    )
}

fn forward(first: u32, after: Option<String>) -> PageRequest {
    PageRequest {
        first: Some(first),
        last: None,
        after,
        before: None,
        query: None,
        sort_key: SortKey::CreatedAt,
    }
}

fn backward(last: u32, before: Option<String>) -> PageRequest {
    PageRequest {
        first: None,
        last: Some(last),
        after: None,
        before,
        query: None,
        sort_key: SortKey::CreatedAt,
    }
}

fn titles(page: &ProductPage) -> Vec<&str> {
    page.products.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn forward_then_backward_returns_to_first_page() {
    let catalog = catalog(12);

    let first = catalog.list_products(&forward(5, None)).await.expect("page 1");
    assert_eq!(first.products.len(), 5);
    assert!(first.page_info.has_next_page);
    assert!(!first.page_info.has_previous_page);

    let second = catalog
        .list_products(&forward(5, first.page_info.end_cursor.clone()))
        .await
        .expect("page 2");
    assert_eq!(titles(&second)[0], "Product 06");
    assert!(second.page_info.has_previous_page);

    let back = catalog
        .list_products(&backward(5, second.page_info.start_cursor.clone()))
        .await
        .expect("back");
    assert_eq!(titles(&back), titles(&first));
    assert_eq!(back.page_info.start_cursor, first.page_info.start_cursor);
    assert_eq!(back.page_info.end_cursor, first.page_info.end_cursor);
}

#[tokio::test]
async fn last_page_reports_no_next() {
    let catalog = catalog(7);
    let first = catalog.list_products(&forward(5, None)).await.expect("page");
    let last = catalog
        .list_products(&forward(5, first.page_info.end_cursor))
        .await
        .expect("page");
    assert_eq!(last.products.len(), 2);
    assert!(!last.page_info.has_next_page);
}

#[tokio::test]
async fn rejects_both_or_neither_count() {
    let catalog = catalog(3);
    let mut both = forward(5, None);
    both.last = Some(5);
    assert!(matches!(
        catalog.list_products(&both).await,
        Err(CatalogError::Graphql(_))
    ));

    let mut neither = forward(5, None);
    neither.first = None;
    assert!(catalog.list_products(&neither).await.is_err());
}

#[tokio::test]
async fn filters_by_title_and_sorts_by_title() {
    let catalog = MemoryCatalog::new(vec![
        product(1, "Wool Hat"),
        product(2, "Boots"),
        product(3, "Cotton hat"),
    ]);
    let mut request = forward(5, None);
    request.query = Some("HAT".into());
    request.sort_key = SortKey::Title;
    let page = catalog.list_products(&request).await.expect("page");
    assert_eq!(titles(&page), vec!["Cotton hat", "Wool Hat"]);
}

#[tokio::test]
async fn empty_result_has_no_cursors() {
    let catalog = MemoryCatalog::default();
    let page = catalog.list_products(&forward(5, None)).await.expect("page");
    assert!(page.products.is_empty());
    assert_eq!(page.page_info, PageInfo::default());
}

#[tokio::test]
async fn update_changes_title_and_rejects_blank() {
    let catalog = catalog(2);
    let id = ProductId::parse("2").expect("id");

    let updated = catalog.update_product_title(&id, "Renamed").await.expect("update");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(catalog.fetch_product(&id).await.expect("fetch").title, "Renamed");

    let err = catalog.update_product_title(&id, " ").await.expect_err("blank");
    assert_eq!(err.catalog_message(), Some("Title can't be blank"));

    let missing = ProductId::parse("99").expect("id");
    assert!(matches!(
        catalog.update_product_title(&missing, "x").await,
        Err(CatalogError::NotFound(_))
    ));
}
