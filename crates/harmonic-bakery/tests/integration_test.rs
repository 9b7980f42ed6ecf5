use async_trait::async_trait;
use bakery_actor::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use harmonic_bakery::cart_actor::CartError;
use harmonic_bakery::config::StorefrontConfig;
use harmonic_bakery::configure::FlowTimer;
use harmonic_bakery::lifecycle::Storefront;
use harmonic_bakery::model::{CartLine, CartLineId, MenuItem, Money, Section};
use harmonic_bakery::order::{DeliveryError, FormCollaborator, FormPayload};
use std::path::Path;
use std::sync::Arc;

/// Accepts every form without sending it anywhere.
struct NullCollaborator;

#[async_trait]
impl FormCollaborator for NullCollaborator {
    async fn submit(&self, _payload: &FormPayload) -> Result<(), DeliveryError> {
        Ok(())
    }
}

fn storefront(snapshots: Arc<dyn SnapshotStore>) -> Storefront {
    Storefront::with_parts(
        StorefrontConfig::default(),
        snapshots,
        Arc::new(NullCollaborator),
    )
}

fn file_storefront(dir: &Path) -> Storefront {
    storefront(Arc::new(FileSnapshotStore::new(dir)))
}

fn item(storefront: &Storefront, id: &str) -> MenuItem {
    storefront.menu.find(id).cloned().unwrap()
}

#[tokio::test]
async fn test_muffins_and_cinnamon_rolls_totals() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let cart = &storefront.cart_client;

    cart.add_line(&item(&storefront, "muffins"), "Blueberry", 2, "")
        .await
        .unwrap();
    assert_eq!(cart.total_price().await.unwrap(), Money::dollars(36));
    assert_eq!(cart.total_count().await.unwrap(), 2);

    cart.add_line(&item(&storefront, "cinnamon"), "", 1, "")
        .await
        .unwrap();
    assert_eq!(cart.total_price().await.unwrap(), Money::dollars(72));
    assert_eq!(cart.total_count().await.unwrap(), 3);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_option_never_mutates_cart() {
    let snapshots = MemorySnapshotStore::new();
    let storefront = storefront(Arc::new(snapshots.clone()));
    let cart = &storefront.cart_client;

    for id in ["muffins", "danishes"] {
        let err = cart
            .add_line(&item(&storefront, id), "", 3, "")
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::MissingOption { .. }));
    }

    assert!(cart.lines().await.unwrap().is_empty());
    assert!(!snapshots.contains("hb_cart"));
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_same_item_can_be_added_twice() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let cart = &storefront.cart_client;
    let danishes = item(&storefront, "danishes");

    let a = cart.add_line(&danishes, "Blueberry", 1, "").await.unwrap();
    let b = cart.add_line(&danishes, "Raspberry", 1, "").await.unwrap();
    assert_ne!(a, b);

    let lines = cart.lines().await.unwrap();
    let options: Vec<&str> = lines.iter().map(|l| l.option.as_str()).collect();
    assert_eq!(options, vec!["Blueberry", "Raspberry"]);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_totals_track_every_mutation() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let cart = &storefront.cart_client;
    let menu: Vec<MenuItem> = storefront.menu.items().to_vec();

    // Expected state, kept alongside the actor
    let mut expected: Vec<(CartLineId, Money, u32)> = Vec::new();
    let mut seed: u32 = 17;
    let mut next = move || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 16) % 1_000
    };

    for _ in 0..60 {
        match next() % 3 {
            0 => {
                let item = &menu[next() as usize % menu.len()];
                let option = item.option_list().first().cloned().unwrap_or_default();
                let batches = next() % 4;
                let id = cart.add_line(item, &option, batches, "").await.unwrap();
                expected.push((id, item.price_per_batch, batches.max(1)));
            }
            1 if !expected.is_empty() => {
                let index = next() as usize % expected.len();
                let (id, _, _) = expected.remove(index);
                cart.remove_line(id).await.unwrap();
            }
            _ if !expected.is_empty() => {
                let index = next() as usize % expected.len();
                let delta = next() as i32 % 7 - 4;
                let entry = &mut expected[index];
                let batches = cart.adjust_quantity(entry.0, delta).await.unwrap();
                entry.2 = (entry.2 as i32 + delta).max(1) as u32;
                assert_eq!(batches, entry.2);
            }
            _ => continue,
        }

        let count: u32 = expected.iter().map(|(_, _, n)| n).sum();
        let price: Money = expected.iter().map(|(_, p, n)| p.times(*n)).sum();
        assert_eq!(cart.total_count().await.unwrap(), count);
        assert_eq!(cart.total_price().await.unwrap(), price);

        let ids: Vec<CartLineId> = cart.lines().await.unwrap().iter().map(|l| l.cart_id).collect();
        let expected_ids: Vec<CartLineId> = expected.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, expected_ids, "insertion order is kept");
    }

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_huge_orders_keep_the_badge_working() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let cart = &storefront.cart_client;
    let rolls = item(&storefront, "cinnamon");

    cart.add_line(&rolls, "", 3_000_000_000, "").await.unwrap();
    let id = cart.add_line(&rolls, "", 3_000_000_000, "").await.unwrap();
    assert_eq!(cart.total_count().await.unwrap(), u32::MAX);

    assert_eq!(cart.adjust_quantity(id, i32::MAX).await.unwrap(), u32::MAX);
    assert_eq!(cart.total_count().await.unwrap(), u32::MAX);
    assert_eq!(
        cart.total_price().await.unwrap(),
        Money::dollars(36).times(3_000_000_000) + Money::dollars(36).times(u32::MAX)
    );

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_adjust_and_remove_edge_cases() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let cart = &storefront.cart_client;
    let id = cart
        .add_line(&item(&storefront, "scones"), "", 2, "")
        .await
        .unwrap();

    assert_eq!(cart.adjust_quantity(id, -5).await.unwrap(), 1);
    assert_eq!(cart.adjust_quantity(id, -1).await.unwrap(), 1);
    assert_eq!(cart.lines().await.unwrap().len(), 1, "decrement never removes");

    let missing = CartLineId::random();
    assert!(matches!(
        cart.adjust_quantity(missing, 1).await,
        Err(CartError::NotFound(_))
    ));
    assert_eq!(cart.remove_line(missing).await, Ok(()));
    assert_eq!(cart.lines().await.unwrap().len(), 1);

    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let first = file_storefront(dir.path());
    let cart = &first.cart_client;
    let muffins = cart
        .add_line(&item(&first, "muffins"), "Chocolate Chip", 1, "")
        .await
        .unwrap();
    cart.add_line(&item(&first, "scones"), "", 2, "warm please")
        .await
        .unwrap();
    cart.adjust_quantity(muffins, 2).await.unwrap();
    cart.set_notes(muffins, "half with nuts").await.unwrap();
    let before: Vec<CartLine> = cart.lines().await.unwrap();
    first.shutdown().await.unwrap();

    let second = file_storefront(dir.path());
    let after = second.cart_client.lines().await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after[0].batches, 3);
    assert_eq!(after[0].notes, "half with nuts");
    second.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_snapshot_shape() {
    let dir = tempfile::tempdir().unwrap();
    let storefront = file_storefront(dir.path());
    let id = storefront
        .cart_client
        .add_line(&item(&storefront, "danishes"), "Strawberry", 2, "")
        .await
        .unwrap();
    storefront.shutdown().await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("hb_cart.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = &json.as_array().unwrap()[0];
    assert_eq!(line["cartId"], id.to_string());
    assert_eq!(line["id"], "danishes");
    assert_eq!(line["name"], "Cream Cheese Danishes");
    assert_eq!(line["batchSize"], 6);
    assert_eq!(line["pricePerBatch"], 18);
    assert_eq!(line["option"], "Strawberry");
    assert_eq!(line["batches"], 2);
    assert_eq!(line["notes"], "");
}

#[tokio::test]
async fn test_malformed_snapshot_starts_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    for garbage in ["", "{\"cart\": []}", "[{\"cartId\": 7}]", "\u{0}\u{1}"] {
        std::fs::write(dir.path().join("hb_cart.json"), garbage).unwrap();

        let storefront = file_storefront(dir.path());
        let cart = &storefront.cart_client;
        assert!(cart.lines().await.unwrap().is_empty(), "input: {garbage:?}");

        cart.add_line(&item(&storefront, "cinnamon"), "", 1, "")
            .await
            .unwrap();
        assert_eq!(cart.total_count().await.unwrap(), 1);
        storefront.shutdown().await.unwrap();
    }
}

#[tokio::test]
async fn test_restored_zero_batches_are_repaired() {
    let snapshots = MemorySnapshotStore::new();
    let first = storefront(Arc::new(snapshots.clone()));
    first
        .cart_client
        .add_line(&item(&first, "cinnamon"), "", 1, "")
        .await
        .unwrap();
    first.shutdown().await.unwrap();

    let raw = snapshots.get("hb_cart").unwrap();
    snapshots
        .save("hb_cart", &raw.replace("\"batches\":1", "\"batches\":0"))
        .unwrap();

    let second = storefront(Arc::new(snapshots));
    assert_eq!(second.cart_client.total_count().await.unwrap(), 1);
    second.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_configuration_flow_through_storefront() {
    let storefront = storefront(Arc::new(MemorySnapshotStore::new()));
    let mut flow = storefront.configure();
    flow.navigate(Section::Cart);

    flow.open(&item(&storefront, "muffins"));
    flow.select_option("Strawberry").unwrap();
    flow.increment().unwrap();
    flow.set_notes("for the team").unwrap();
    flow.commit().await.unwrap();

    assert_eq!(flow.next_timer().await, Some(FlowTimer::AutoClose));
    assert!(!flow.is_open());
    assert_eq!(flow.section(), Section::Menu);

    let lines = storefront.cart_client.lines().await.unwrap();
    assert_eq!(lines[0].option, "Strawberry");
    assert_eq!(lines[0].batches, 2);
    assert_eq!(lines[0].notes, "for the team");

    drop(flow);
    storefront.shutdown().await.unwrap();
}
