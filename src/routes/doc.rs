use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, MeResponse, RegisterRequest},
        documents::{DocumentKindInfo, DocumentKindList, FieldInfo},
        invoices::{
            CreateInvoiceRequest, InvoiceLineRequest, InvoiceList, InvoiceWithItems,
            SettleInvoiceRequest,
        },
        products::{CreateProductRequest, DeletedIds, ProductList, UpdateProductRequest},
        sales::{CreateSaleRequest, SaleList, UpdateSaleRequest},
    },
    error::FieldIssue,
    models::{Invoice, InvoiceItem, PaymentMethod, PaymentStatus, Product, ProductCategory, Sale, User},
    response::{ApiResponse, Meta},
    routes::{auth, documents, health, invoices, params, products, sales},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        auth::logout,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::delete_products,
        sales::list_sales,
        sales::create_sale,
        sales::get_sale,
        sales::update_sale,
        sales::delete_sale,
        sales::delete_sales,
        invoices::list_invoices,
        invoices::create_invoice,
        invoices::get_invoice,
        invoices::settle_invoice,
        invoices::delete_invoice,
        invoices::delete_invoices,
        documents::list_kinds,
        documents::render_document
    ),
    components(
        schemas(
            User,
            Product,
            ProductCategory,
            Sale,
            Invoice,
            InvoiceItem,
            PaymentMethod,
            PaymentStatus,
            FieldIssue,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MeResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            DeletedIds,
            CreateSaleRequest,
            UpdateSaleRequest,
            SaleList,
            CreateInvoiceRequest,
            InvoiceLineRequest,
            SettleInvoiceRequest,
            InvoiceList,
            InvoiceWithItems,
            DocumentKindInfo,
            DocumentKindList,
            FieldInfo,
            params::Pagination,
            params::ProductQuery,
            params::SaleListQuery,
            params::InvoiceListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Sale>,
            ApiResponse<SaleList>,
            ApiResponse<InvoiceWithItems>,
            ApiResponse<InvoiceList>,
            ApiResponse<DocumentKindList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Sales", description = "Point-of-sale record endpoints"),
        (name = "Invoices", description = "Invoice endpoints"),
        (name = "Documents", description = "Affidavit template endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
