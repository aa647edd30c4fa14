// All values reach the catalog as variables; nothing is spliced into these
// documents.

macro_rules! product_fields {
    () => {
        "
fragment ProductFields on Product {
  id
  title
  description
  status
  images(first: 1) {
    nodes {
      url
    }
  }
}
"
    };
}

pub(crate) const PRODUCTS_QUERY: &str = concat!(
    "
query ProductList($first: Int, $last: Int, $after: String, $before: String, $query: String, $sortKey: ProductSortKeys) {
  products(first: $first, last: $last, after: $after, before: $before, query: $query, sortKey: $sortKey) {
    nodes {
      ...ProductFields
    }
    pageInfo {
      startCursor
      endCursor
      hasNextPage
      hasPreviousPage
    }
  }
}
",
    product_fields!()
);

pub(crate) const PRODUCT_QUERY: &str = concat!(
    "
query Product($id: ID!) {
  product(id: $id) {
    ...ProductFields
  }
}
",
    product_fields!()
);

pub(crate) const PRODUCT_UPDATE_MUTATION: &str = concat!(
    "
mutation ProductUpdate($input: ProductInput!) {
  productUpdate(input: $input) {
    product {
      ...ProductFields
    }
    userErrors {
      field
      message
    }
  }
}
",
    product_fields!()
);
