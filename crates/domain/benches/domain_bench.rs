use common::CustomerId;
use criterion::{Criterion, criterion_group, criterion_main};
use doc_store::MemoryStore;
use domain::{
    Attachment, CartService, CatalogService, CheckoutCoordinator, CheckoutRequest, Money,
    PaymentMethod, Product, ProductDraft, ShippingAddress,
};

fn draft() -> ProductDraft {
    ProductDraft {
        name: "Benchmark Widget".to_string(),
        description: "A widget".to_string(),
        price: Money::from_cents(150_000),
        category: "Widgets".to_string(),
        image_url: "https://example.com/widget.jpg".to_string(),
        is_active: true,
    }
}

fn request() -> CheckoutRequest {
    CheckoutRequest {
        shipping: ShippingAddress {
            full_name: "Ana Torres".to_string(),
            national_id: "30111222".to_string(),
            locality: "Rosario".to_string(),
            region: "Santa Fe".to_string(),
            phone: "+54 341 555 0101".to_string(),
            email: "ana@example.com".to_string(),
        },
        payment_method: PaymentMethod::BankTransfer,
        receipt: Attachment {
            file_name: "receipt.jpg".to_string(),
            data: "ZmFrZS1qcGVn".to_string(),
        },
    }
}

async fn stocked_store() -> (MemoryStore, Product) {
    let store = MemoryStore::new();
    let product = CatalogService::new(store.clone())
        .add_product(draft())
        .await
        .unwrap();
    (store, product)
}

fn bench_add_to_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (store, product) = rt.block_on(stocked_store());
    let cart = CartService::new(store);
    let customer = CustomerId::new("bench");

    c.bench_function("domain/add_to_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                cart.add_item(&customer, &product, 1).await.unwrap();
            });
        });
    });
}

fn bench_checkout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/cart_to_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (store, product) = stocked_store().await;
                let customer = CustomerId::new("bench");
                CartService::new(store.clone())
                    .add_item(&customer, &product, 2)
                    .await
                    .unwrap();
                CheckoutCoordinator::new(store)
                    .place_order(&customer, request())
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_add_to_cart, bench_checkout);
criterion_main!(benches);
