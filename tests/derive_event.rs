//! Integration test for the Event derive macro.

use std::{cell::RefCell, rc::Rc};

use emitron::{Event, EventBus, SubscribeOptions, Topic};

#[derive(Debug, Clone, PartialEq, Event)]
#[allow(dead_code)]
enum Shop {
    Opened,
    Sale(u32),
    Discount(Option<u8>),
    Order { id: u64, items: Vec<String> },
}

#[test]
fn test_derived_key_per_variant() {
    assert_eq!(Shop::Opened.key(), ShopKey::Opened);
    assert_eq!(Shop::Sale(3).key(), ShopKey::Sale);
    assert_eq!(Shop::Discount(None).key(), ShopKey::Discount);
    assert_eq!(
        Shop::Order {
            id: 1,
            items: vec![]
        }
        .key(),
        ShopKey::Order
    );
}

#[test]
fn test_derived_key_display() {
    assert_eq!(ShopKey::Opened.to_string(), "Opened");
    assert_eq!(ShopKey::Order.to_string(), "Order");
}

#[test]
fn test_typed_bus_dispatch() {
    let bus = EventBus::<Shop>::new();
    let sales = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = sales.clone();
    bus.on(ShopKey::Sale, move |event, key| {
        assert_eq!(*key, ShopKey::Sale);
        if let Shop::Sale(amount) = event {
            s.borrow_mut().push(*amount);
        }
        Ok(())
    });
    let s = seen.clone();
    bus.on(Topic::Wildcard, move |_, key| {
        s.borrow_mut().push(key.to_string());
        Ok(())
    });

    bus.emit(Shop::Opened).unwrap();
    bus.emit(Shop::Sale(10)).unwrap();
    bus.emit(Shop::Discount(Some(5))).unwrap();
    bus.emit(Shop::Discount(None)).unwrap();
    bus.emit(Shop::Sale(7)).unwrap();

    assert_eq!(*sales.borrow(), vec![10, 7]);
    assert_eq!(
        *seen.borrow(),
        vec!["Opened", "Sale", "Discount", "Discount", "Sale"]
    );
}

#[test]
fn test_typed_bus_group_once() {
    let bus = EventBus::<Shop>::new();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let h = hits.clone();
    bus.on_many(
        &[ShopKey::Opened, ShopKey::Sale],
        move |event, _| {
            h.borrow_mut().push(event.clone());
            Ok(())
        },
        SubscribeOptions::default().once(),
    )
    .unwrap();

    bus.emit(Shop::Sale(1)).unwrap();
    bus.emit(Shop::Opened).unwrap();

    assert_eq!(*hits.borrow(), vec![Shop::Sale(1)]);
}
