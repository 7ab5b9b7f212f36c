use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use briolka_catalog::CatalogRepository;
use briolka_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, ProductId, SessionId, ValidationFailure,
    ValueObject,
};
use briolka_events::Event;

/// Cart line: which product, how many. Never holds product data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Always >= 1; a line with quantity 0 does not exist.
    pub quantity: u32,
}

impl ValueObject for CartLine {}

/// Upper bound on a single line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPolicy {
    max_per_line: u32,
}

impl QuantityPolicy {
    pub const DEFAULT_MAX_PER_LINE: u32 = 99;

    pub fn new(max_per_line: u32) -> DomainResult<Self> {
        if max_per_line == 0 {
            return Err(DomainError::invariant("max quantity per line must be at least 1"));
        }
        Ok(Self { max_per_line })
    }

    pub fn max_per_line(&self) -> u32 {
        self.max_per_line
    }

    fn check(&self, quantity: i64) -> DomainResult<u32> {
        match u32::try_from(quantity) {
            Ok(q) if q >= 1 && q <= self.max_per_line => Ok(q),
            _ => Err(DomainError::validation(ValidationFailure::InvalidQuantity(quantity))),
        }
    }
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        Self {
            max_per_line: Self::DEFAULT_MAX_PER_LINE,
        }
    }
}

/// Result of `getCartTotals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Whole currency units.
    pub total_price: u64,
    pub total_items: u64,
}

/// Aggregate root: Cart (one per session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    lines: Vec<CartLine>,
    policy: QuantityPolicy,
    version: u64,
}

impl Cart {
    /// Empty cart for a session.
    pub fn new(id: SessionId, policy: QuantityPolicy) -> Self {
        Self {
            id,
            lines: Vec::new(),
            policy,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    /// Lines in the order products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Quantity held for a product, 0 when there is no line.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price × quantity, prices resolved through the catalog.
    pub fn total_price<C>(&self, catalog: &C) -> DomainResult<u64>
    where
        C: CatalogRepository + ?Sized,
    {
        self.lines.iter().try_fold(0u64, |total, line| {
            let product = catalog.lookup(line.product_id)?;
            product
                .price()
                .checked_mul(u64::from(line.quantity))
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(|| DomainError::invariant("cart total overflows u64"))
        })
    }

    pub fn totals<C>(&self, catalog: &C) -> DomainResult<CartTotals>
    where
        C: CatalogRepository + ?Sized,
    {
        Ok(CartTotals {
            total_price: self.total_price(catalog)?,
            total_items: self.total_items(),
        })
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
///
/// `quantity` is signed so a negative request can be rejected explicitly
/// instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    SetQuantity(SetQuantity),
}

/// Event: LineAdded (new line with quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged (existing line set to `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub cart_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded(LineAdded),
    QuantityChanged(QuantityChanged),
    LineRemoved(LineRemoved),
}

impl CartEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartEvent::LineAdded(e) => e.product_id,
            CartEvent::QuantityChanged(e) => e.product_id,
            CartEvent::LineRemoved(e) => e.product_id,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line.added",
            CartEvent::QuantityChanged(_) => "cart.line.quantity_changed",
            CartEvent::LineRemoved(_) => "cart.line.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::LineRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                if self.line(e.product_id).is_none() {
                    self.lines.push(CartLine {
                        product_id: e.product_id,
                        quantity: 1,
                    });
                }
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == e.product_id) {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.retain(|l| l.product_id != e.product_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
        }
    }
}

impl Cart {
    fn ensure_cart_id(&self, cart_id: SessionId) -> Result<(), DomainError> {
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        match self.line(cmd.product_id) {
            Some(line) => {
                let quantity = self.policy.check(i64::from(line.quantity) + 1)?;
                Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
                    cart_id: cmd.cart_id,
                    product_id: cmd.product_id,
                    quantity,
                    occurred_at: cmd.occurred_at,
                })])
            }
            None => Ok(vec![CartEvent::LineAdded(LineAdded {
                cart_id: cmd.cart_id,
                product_id: cmd.product_id,
                occurred_at: cmd.occurred_at,
            })]),
        }
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if self.line(cmd.product_id).is_none() {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::LineRemoved(LineRemoved {
            cart_id: cmd.cart_id,
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if cmd.quantity == 0 {
            return self.handle_remove(&RemoveItem {
                cart_id: cmd.cart_id,
                product_id: cmd.product_id,
                occurred_at: cmd.occurred_at,
            });
        }

        let quantity = self.policy.check(cmd.quantity)?;

        // Only existing lines are updated; setting a quantity never creates one.
        match self.line(cmd.product_id) {
            Some(line) if line.quantity != quantity => {
                Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
                    cart_id: cmd.cart_id,
                    product_id: cmd.product_id,
                    quantity,
                    occurred_at: cmd.occurred_at,
                })])
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briolka_catalog::{InMemoryCatalog, NewProduct};
    use briolka_events::execute;

    fn test_cart_id() -> SessionId {
        SessionId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn pid(id: u32) -> ProductId {
        ProductId::new(id)
    }

    fn catalog() -> InMemoryCatalog {
        let product = |id: u32, price: u64| NewProduct {
            id: pid(id),
            name: format!("Bracelet {id}"),
            stone_type: "Оникс".to_string(),
            price,
            image_ref: String::new(),
            description: String::new(),
            reviews: Vec::new(),
        };
        InMemoryCatalog::new(vec![product(1, 12500), product(2, 9800), product(3, 11200)]).unwrap()
    }

    fn add(cart: &mut Cart, product_id: u32) -> DomainResult<Vec<CartEvent>> {
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product_id: pid(product_id),
            occurred_at: test_time(),
        });
        execute(cart, &cmd)
    }

    fn remove(cart: &mut Cart, product_id: u32) -> DomainResult<Vec<CartEvent>> {
        let cmd = CartCommand::RemoveItem(RemoveItem {
            cart_id: cart.id_typed(),
            product_id: pid(product_id),
            occurred_at: test_time(),
        });
        execute(cart, &cmd)
    }

    fn set(cart: &mut Cart, product_id: u32, quantity: i64) -> DomainResult<Vec<CartEvent>> {
        let cmd = CartCommand::SetQuantity(SetQuantity {
            cart_id: cart.id_typed(),
            product_id: pid(product_id),
            quantity,
            occurred_at: test_time(),
        });
        execute(cart, &cmd)
    }

    fn snapshot(cart: &Cart) -> Vec<(u32, u32)> {
        cart.lines()
            .iter()
            .map(|l| (l.product_id.get(), l.quantity))
            .collect()
    }

    #[test]
    fn add_new_product_appends_line_with_quantity_one() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        let events = add(&mut cart, 1).unwrap();

        assert_eq!(events.len(), 1);
        match &events[0] {
            CartEvent::LineAdded(e) => assert_eq!(e.product_id, pid(1)),
            _ => panic!("Expected LineAdded event"),
        }
        assert_eq!(snapshot(&cart), vec![(1, 1)]);
    }

    #[test]
    fn adding_same_product_twice_yields_one_line_with_quantity_two() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        let events = add(&mut cart, 1).unwrap();

        match &events[0] {
            CartEvent::QuantityChanged(e) => assert_eq!(e.quantity, 2),
            _ => panic!("Expected QuantityChanged event"),
        }
        assert_eq!(snapshot(&cart), vec![(1, 2)]);
    }

    #[test]
    fn remove_absent_product_is_a_no_op() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 2).unwrap();
        let before = cart.clone();

        let events = remove(&mut cart, 1).unwrap();
        assert!(events.is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn remove_deletes_matching_line() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        add(&mut cart, 2).unwrap();

        remove(&mut cart, 1).unwrap();
        assert_eq!(snapshot(&cart), vec![(2, 1)]);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();

        let events = set(&mut cart, 1, 0).unwrap();
        assert!(matches!(events.as_slice(), [CartEvent::LineRemoved(_)]));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_on_absent_line_is_a_no_op() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 2).unwrap();
        let before = cart.clone();

        assert!(set(&mut cart, 1, 0).unwrap().is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn set_quantity_updates_existing_line() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 3).unwrap();

        set(&mut cart, 3, 5).unwrap();
        assert_eq!(snapshot(&cart), vec![(3, 5)]);
    }

    #[test]
    fn set_quantity_on_absent_line_does_not_create_one() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        assert!(set(&mut cart, 1, 4).unwrap().is_empty());
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_to_current_value_emits_nothing() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        assert!(set(&mut cart, 1, 1).unwrap().is_empty());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        let before = cart.clone();

        let err = set(&mut cart, 1, -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationFailed(ValidationFailure::InvalidQuantity(-1))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn quantity_above_policy_limit_is_rejected() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::new(3).unwrap());
        add(&mut cart, 1).unwrap();

        let err = set(&mut cart, 1, 4).unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationFailed(ValidationFailure::InvalidQuantity(4))
        );

        set(&mut cart, 1, 3).unwrap();
        let err = add(&mut cart, 1).unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationFailed(ValidationFailure::InvalidQuantity(4))
        );
        assert_eq!(snapshot(&cart), vec![(1, 3)]);
    }

    #[test]
    fn policy_requires_positive_limit() {
        assert!(QuantityPolicy::new(0).is_err());
        assert_eq!(QuantityPolicy::default().max_per_line(), 99);
    }

    #[test]
    fn commands_for_another_cart_are_rejected() {
        let cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: test_cart_id(),
            product_id: pid(1),
            occurred_at: test_time(),
        });
        match cart.handle(&cmd).unwrap_err() {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for cart mismatch"),
        }
    }

    #[test]
    fn totals_resolve_prices_through_catalog() {
        let catalog = catalog();
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        add(&mut cart, 1).unwrap();
        add(&mut cart, 2).unwrap();

        assert_eq!(cart.total_price(&catalog).unwrap(), 34800);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(
            cart.totals(&catalog).unwrap(),
            CartTotals {
                total_price: 34800,
                total_items: 3
            }
        );
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        assert_eq!(cart.totals(&catalog()).unwrap(), CartTotals::default());
    }

    #[test]
    fn totals_report_lines_missing_from_catalog() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 42).unwrap();
        assert_eq!(
            cart.total_price(&catalog()).unwrap_err(),
            DomainError::NotFound(pid(42))
        );
    }

    #[test]
    fn end_to_end_sequence() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        assert!(cart.is_empty());

        add(&mut cart, 1).unwrap();
        assert_eq!(snapshot(&cart), vec![(1, 1)]);
        add(&mut cart, 1).unwrap();
        assert_eq!(snapshot(&cart), vec![(1, 2)]);
        add(&mut cart, 2).unwrap();
        assert_eq!(snapshot(&cart), vec![(1, 2), (2, 1)]);
        set(&mut cart, 1, 0).unwrap();
        assert_eq!(snapshot(&cart), vec![(2, 1)]);

        assert_eq!(cart.version(), 4);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        add(&mut cart, 1).unwrap();
        let before = cart.clone();

        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product_id: pid(1),
            occurred_at: test_time(),
        });
        let events1 = cart.handle(&cmd).unwrap();
        let events2 = cart.handle(&cmd).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn event_types_are_stable() {
        let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
        let added = add(&mut cart, 1).unwrap();
        let changed = add(&mut cart, 1).unwrap();
        let removed = remove(&mut cart, 1).unwrap();

        assert_eq!(added[0].event_type(), "cart.line.added");
        assert_eq!(changed[0].event_type(), "cart.line.quantity_changed");
        assert_eq!(removed[0].event_type(), "cart.line.removed");
        assert_eq!(removed[0].product_id(), pid(1));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u32),
            Remove(u32),
            Set(u32, i64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1u32..=4).prop_map(Op::Add),
                (1u32..=4).prop_map(Op::Remove),
                ((1u32..=4), (-3i64..=12)).prop_map(|(p, q)| Op::Set(p, q)),
            ]
        }

        proptest! {
            /// Property: whatever the action sequence, lines stay unique per
            /// product and every quantity stays within 1..=max.
            #[test]
            fn lines_stay_unique_and_positive(ops in prop::collection::vec(op(), 0..60)) {
                let mut cart = Cart::new(test_cart_id(), QuantityPolicy::new(10).unwrap());
                for op in ops {
                    let _ = match op {
                        Op::Add(p) => add(&mut cart, p),
                        Op::Remove(p) => remove(&mut cart, p),
                        Op::Set(p, q) => set(&mut cart, p, q),
                    };
                }

                let mut ids: Vec<u32> = cart.lines().iter().map(|l| l.product_id.get()).collect();
                let len = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), len);

                for line in cart.lines() {
                    prop_assert!((1..=10).contains(&line.quantity));
                }

                let sum: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
                prop_assert_eq!(cart.total_items(), sum);
            }

            /// Property: a rejected command leaves the cart untouched.
            #[test]
            fn rejected_commands_do_not_mutate(q in -50i64..0) {
                let mut cart = Cart::new(test_cart_id(), QuantityPolicy::default());
                add(&mut cart, 1).unwrap();
                let before = cart.clone();

                prop_assert!(set(&mut cart, 1, q).is_err());
                prop_assert_eq!(cart, before);
            }
        }
    }
}
