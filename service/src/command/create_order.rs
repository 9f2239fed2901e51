//! [`Command`] for converting [`cart::Item`]s into [`Order`]s.

use std::collections::HashSet;

use common::{
    operations::{
        By, Commit, Delete, Insert, Lock, Select, Transact, Transacted,
    },
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, cart, order, user, Advert, Order, Profile},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for converting [`cart::Item`]s of a user into [`Order`]s, one
/// per [`Item`].
///
/// The whole batch is either converted or not: every [`Item`] is checked
/// before any [`cart::Item`] is removed or any [`Order`] is created, and all
/// the [`Order`]s are created at once before the [`cart::Item`]s are
/// removed.
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// ID of the user placing the [`Order`]s.
    pub user_id: user::Id,

    /// [`Item`]s to be ordered, in the order of their processing.
    pub items: Vec<Item>,
}

/// Single [`Advert`] requested to be ordered.
#[derive(Clone, Debug)]
pub struct Item {
    /// ID of the [`Advert`] in the [`cart::List::Cart`].
    pub advert_id: advert::Id,

    /// [`user::Phone`] of the recipient.
    ///
    /// Falls back to the one of the user's [`Profile`], if omitted.
    pub phone: Option<user::Phone>,

    /// [`order::RecipientName`] of the recipient.
    pub name: order::RecipientName,

    /// [`user::Email`] of the recipient, if any.
    pub email: Option<user::Email>,

    /// Delivery [`order::Address`].
    pub address: order::Address,

    /// [`order::DeliveryPrice`] of the [`Order`].
    pub delivery_price: order::DeliveryPrice,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<cart::Item, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Order, user::Id>>, Err = Traced<database::Error>>
        + Database<
            Select<By<read::cart::Contains, cart::Item>>,
            Ok = read::cart::Contains,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Advert>, advert::Id>>,
            Ok = Option<Advert>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Delete<cart::Item>, Err = Traced<database::Error>>
        + Database<
            Insert<Vec<order::Draft>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Vec<Order>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder { user_id, items } = cmd;
        if items.is_empty() {
            return Ok(vec![]);
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<cart::Item, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Lock(By::<Order, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let profile_phone = tx
            .execute(Select(By::<Option<Profile>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .and_then(|p| p.phone);

        let created_at = DateTime::now().coerce();
        let mut seen = HashSet::with_capacity(items.len());
        let mut cart_items = Vec::with_capacity(items.len());
        let mut drafts = Vec::with_capacity(items.len());
        for item in items {
            let Item {
                advert_id,
                phone,
                name,
                email,
                address,
                delivery_price,
            } = item;
            let cart_item = cart::Item {
                user_id,
                advert_id,
                list: cart::List::Cart,
            };

            // The same `cart::Item` cannot be consumed twice.
            let contains = seen.insert(advert_id)
                && *tx
                    .execute(Select(By::<read::cart::Contains, _>::new(
                        cart_item,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !contains {
                return Err(tracerr::new!(E::NotInCart(advert_id)));
            }

            let advert = tx
                .execute(Select(By::<Option<Advert>, _>::new(advert_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .filter(|a| !a.is_deleted())
                .ok_or(E::AdvertNotExists(advert_id))
                .map_err(tracerr::wrap!())?;

            let phone = phone
                .or_else(|| profile_phone.clone())
                .ok_or(E::PhoneMissing(advert_id))
                .map_err(tracerr::wrap!())?;

            cart_items.push(cart_item);
            drafts.push(order::Draft {
                user_id,
                advert_id,
                phone,
                name,
                email,
                address,
                delivery_price,
                title: advert.title,
                price: advert.price,
                created_at,
            });
        }

        // Writes are not undone on failure, so the only fallible one goes
        // first and inserts either every `Order` or none.
        let orders = tx
            .execute(Insert(drafts))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        for cart_item in cart_items {
            tx.execute(Delete(cart_item))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(orders)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] with the provided ID does not exist or is deleted.
    #[display("`Advert(id: {_0})` does not exist")]
    AdvertNotExists(#[error(not(source))] advert::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Advert`] is not present in the [`cart::List::Cart`].
    #[display("`Advert(id: {_0})` is not in the cart")]
    NotInCart(#[error(not(source))] advert::Id),

    /// Neither the [`Item`] nor the [`Profile`] provide a [`user::Phone`].
    #[display("No phone is provided to order `Advert(id: {_0})`")]
    PhoneMissing(#[error(not(source))] advert::Id),
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::{
        command::{ToggleCartItem, UpdateProfile},
        domain::{advert, cart, order, user, Advert},
        infra::{
            database,
            memory::{self, Connection as _, Orders},
            Memory,
        },
        query,
        test_util::{listed_advert, seeded},
        Command as _, Query as _, Service,
    };

    use super::{CreateOrder, ExecutionError, Item};

    fn item(advert: &Advert, phone: Option<&str>) -> Item {
        Item {
            advert_id: advert.id,
            phone: phone.map(|p| user::Phone::new(p).unwrap()),
            name: order::RecipientName::new("Ivan").unwrap(),
            email: None,
            address: order::Address::new("Lenina 1").unwrap(),
            delivery_price: 50_u64.into(),
        }
    }

    async fn add_to_cart(svc: &Service<Memory>, advert: &Advert) {
        assert!(svc
            .execute(ToggleCartItem {
                user_id: 1_u64.into(),
                advert_id: advert.id,
                list: cart::List::Cart,
            })
            .await
            .unwrap());
    }

    async fn cart(svc: &Service<Memory>) -> Vec<Advert> {
        svc.execute(query::cart::ByUser {
            user_id: 1_u64.into(),
            list: cart::List::Cart,
        })
        .await
        .unwrap()
    }

    async fn orders(svc: &Service<Memory>) -> Vec<order::Order> {
        svc.execute(query::orders::ByUser::by(1_u64.into()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn converts_cart_into_orders() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;
        add_to_cart(&svc, &advert).await;

        let created = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![item(&advert, Some("+380991234567"))],
            })
            .await
            .unwrap();

        assert!(cart(&svc).await.is_empty());
        let orders = orders(&svc).await;
        assert_eq!(orders, created);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, order::Id::FIRST);
        assert_eq!(orders[0].status, order::Status::Created);
        assert_eq!(orders[0].advert_id, advert.id);
        assert_eq!(orders[0].title, advert.title);
        assert_eq!(orders[0].price, advert.price);
    }

    #[tokio::test]
    async fn fails_the_whole_batch() {
        let svc = seeded().await;
        let first = listed_advert(&svc).await;
        let second = listed_advert(&svc).await;
        add_to_cart(&svc, &first).await;

        let err = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![
                    item(&first, Some("+380991234567")),
                    item(&second, Some("+380991234567")),
                ],
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NotInCart(id) if *id == second.id,
        ));
        assert_eq!(cart(&svc).await, [first]);
        assert!(orders(&svc).await.is_empty());
    }

    #[tokio::test]
    async fn rejects_consuming_item_twice() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;
        add_to_cart(&svc, &advert).await;

        let err = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![
                    item(&advert, Some("+380991234567")),
                    item(&advert, Some("+380991234567")),
                ],
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotInCart(_)));
        assert_eq!(cart(&svc).await, [advert]);
    }

    #[tokio::test]
    async fn falls_back_to_profile_phone() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;
        add_to_cart(&svc, &advert).await;

        let err = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![item(&advert, None)],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::PhoneMissing(_)));

        _ = svc
            .execute(UpdateProfile {
                user_id: 1_u64.into(),
                rating: None,
                city: None,
                phone: Some(user::Phone::new("+380991234567").unwrap()),
            })
            .await
            .unwrap();

        let orders = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![item(&advert, None)],
            })
            .await
            .unwrap();
        assert_eq!(orders[0].phone.as_ref(), "+380991234567");
    }

    #[tokio::test]
    async fn keeps_cart_when_order_ids_run_out() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;
        add_to_cart(&svc, &advert).await;
        let last = order::Id::from(u64::MAX);
        svc.database()
            .write(|orders: &mut Orders| {
                orders.put(
                    order::Draft {
                        user_id: 2_u64.into(),
                        advert_id: advert.id,
                        phone: user::Phone::new("+380991234567").unwrap(),
                        name: order::RecipientName::new("Petr").unwrap(),
                        email: None,
                        address: order::Address::new("Lenina 2").unwrap(),
                        delivery_price: 0_u64.into(),
                        title: advert::Title::new("Phone").unwrap(),
                        price: 1_u64.into(),
                        created_at: DateTime::now().coerce(),
                    }
                    .into_order(last),
                );
            })
            .await;

        let err = svc
            .execute(CreateOrder {
                user_id: 1_u64.into(),
                items: vec![item(&advert, Some("+380991234567"))],
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Db(database::Error::Memory(
                memory::Error::IdOverflow(_),
            )),
        ));
        assert_eq!(cart(&svc).await, [advert]);
        assert!(orders(&svc).await.is_empty());
    }
}
