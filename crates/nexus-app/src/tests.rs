//! Service tests against an in-memory SQLite store.

use std::sync::Arc;

use nexus_core::{
  client::NewClient,
  event::NewEvent,
  message::ConversationKind,
  notification::{NewNotification, NotificationKind},
  record::{self, RecordId},
  store::Store,
  user::NewUser,
};
use nexus_store_sqlite::SqliteStore;
use serde_json::json;

use crate::{
  Error,
  auth::Auth,
  calendar::Calendar,
  clients::{ClientPatch, Clients},
  messaging::{Messaging, Sender, StartConversation},
  notifications::{NotificationFilter, Notifications, ReadStatus},
  reports::{QuoteFilter, Reports},
};

async fn store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.expect("in-memory store"))
}

fn user(first: &str, last: &str, cedula: &str, email: &str) -> NewUser {
  NewUser {
    first_name: first.into(),
    last_name:  last.into(),
    cedula:     cedula.into(),
    email:      email.into(),
  }
}

fn sender() -> Sender {
  Sender { id: RecordId::Num(1), name: "Operador".into() }
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_login_round_trip() {
  let auth = Auth::new(store().await);

  let registered = auth
    .register(user("José", "Pérez", "12345", "jose@example.com"))
    .await
    .unwrap();
  assert_eq!(registered.name, "José Pérez");
  assert!(registered.id.is_some());

  // Case, accents, and whitespace in the name are immaterial.
  let session = auth.login("12345", "  jose   perez ").await.unwrap();
  assert_eq!(session.cedula, "12345");
  assert_eq!(session.user_id, registered.id.unwrap());
}

#[tokio::test]
async fn login_with_unknown_cedula_fails() {
  let auth = Auth::new(store().await);
  let err = auth.login("999", "Nadie").await.unwrap_err();
  assert!(matches!(err, Error::UnknownUser { .. }));
}

#[tokio::test]
async fn login_with_wrong_name_fails() {
  let auth = Auth::new(store().await);
  auth
    .register(user("Ana", "Solis", "111", "ana@example.com"))
    .await
    .unwrap();

  let err = auth.login("111", "Bea Solis").await.unwrap_err();
  assert!(matches!(err, Error::NameMismatch));
}

#[tokio::test]
async fn duplicate_cedula_is_a_store_conflict() {
  let auth = Auth::new(store().await);
  auth
    .register(user("Ana", "Solis", "111", "ana@example.com"))
    .await
    .unwrap();

  let err = auth
    .register(user("Bea", "Mora", "111", "bea@example.com"))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Store(nexus_core::Error::Conflict { field: "cedula", .. })
  ));
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
  let auth = Auth::new(store().await);
  auth
    .register(user("Ana", "Solis", "111", "ana@example.com"))
    .await
    .unwrap();

  let err = auth
    .register(user("Bea", "Mora", "222", "ANA@example.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(_)));
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn client_crud_round_trip() {
  let clients = Clients::new(store().await);

  let created = clients
    .create(NewClient {
      name:  "Acme".into(),
      email: "ventas@acme.test".into(),
      phone: "555-0100".into(),
    })
    .await
    .unwrap();
  let id = created.id.clone().unwrap();

  assert!(clients.get(&id).await.unwrap().is_some());

  clients
    .update(&id, ClientPatch { email: Some("compras@acme.test".into()), ..Default::default() })
    .await
    .unwrap();
  let updated = clients.get(&id).await.unwrap().unwrap();
  assert_eq!(updated.email, "compras@acme.test");
  assert_eq!(updated.phone, "555-0100");

  clients.delete(&id).await.unwrap();
  assert!(clients.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn client_name_is_required() {
  let clients = Clients::new(store().await);
  let err = clients.create(NewClient { name: "  ".into(), ..Default::default() }).await;
  assert!(matches!(err, Err(Error::Invalid(_))));
}

// ─── Calendar ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn month_filter_returns_the_clients_event() {
  let store = store().await;
  let clients = Clients::new(store.clone());
  let calendar = Calendar::new(store);

  let acme = clients
    .create(NewClient { name: "Acme".into(), ..Default::default() })
    .await
    .unwrap();
  let acme_id = acme.id.unwrap();

  calendar
    .create(NewEvent {
      title:       "Visita".into(),
      description: None,
      kind:        "visita".into(),
      starts_at:   "2024-05-01T10:00".into(),
      ends_at:     Some("2024-05-01T11:00".into()),
      client_id:   Some(acme_id.clone()),
    })
    .await
    .unwrap();
  calendar
    .create(NewEvent {
      title:       "Otra".into(),
      description: None,
      kind:        "reunion".into(),
      starts_at:   "2024-06-15T09:00".into(),
      ends_at:     None,
      client_id:   None,
    })
    .await
    .unwrap();

  let may = calendar.events_in_month(2024, 5).await.unwrap();
  assert_eq!(may.len(), 1);
  assert_eq!(may[0].title, "Visita");
  assert_eq!(may[0].client_id, Some(acme_id.clone()));

  let for_acme = calendar.events_for_client(&acme_id).await.unwrap();
  assert_eq!(for_acme.len(), 1);
}

#[tokio::test]
async fn event_end_defaults_to_start_when_missing_or_earlier() {
  let calendar = Calendar::new(store().await);

  let open_ended = calendar
    .create(NewEvent {
      title:       "Llamada".into(),
      description: None,
      kind:        String::new(),
      starts_at:   "2024-05-01T10:00".into(),
      ends_at:     None,
      client_id:   None,
    })
    .await
    .unwrap();
  assert_eq!(open_ended.ends_at, "2024-05-01T10:00");

  let backwards = calendar
    .create(NewEvent {
      title:       "Llamada".into(),
      description: None,
      kind:        String::new(),
      starts_at:   "2024-05-01T10:00".into(),
      ends_at:     Some("2024-05-01T09:00".into()),
      client_id:   None,
    })
    .await
    .unwrap();
  assert_eq!(backwards.ends_at, "2024-05-01T10:00");
}

#[tokio::test]
async fn event_title_search_is_case_insensitive() {
  let calendar = Calendar::new(store().await);
  calendar
    .create(NewEvent {
      title:       "Mantenimiento preventivo".into(),
      description: None,
      kind:        String::new(),
      starts_at:   "2024-05-01T10:00".into(),
      ends_at:     None,
      client_id:   None,
    })
    .await
    .unwrap();

  assert_eq!(calendar.search("PREVENT").await.unwrap().len(), 1);
  assert!(calendar.search("inexistente").await.unwrap().is_empty());
}

// ─── Messaging ───────────────────────────────────────────────────────────────

async fn seeded_thread(messaging: &Messaging<SqliteStore>) -> String {
  let (conversation, _) = messaging
    .start(
      &sender(),
      StartConversation {
        kind:             ConversationKind::Client,
        participant_id:   RecordId::Num(1),
        participant_name: "Empresa ABC".into(),
        subject:          Some("Mantenimiento".into()),
        body:             "Buenos días".into(),
      },
    )
    .await
    .unwrap();
  conversation.id
}

#[tokio::test]
async fn inbound_messages_raise_the_unread_counter() {
  let messaging = Messaging::new(store().await);
  let conv = seeded_thread(&messaging).await;

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&conv, &abc, "¿Precio?".into()).await.unwrap();
  messaging.record_inbound(&conv, &abc, "¿Y plazo?".into()).await.unwrap();

  assert_eq!(messaging.total_unread().await.unwrap(), 2);
}

#[tokio::test]
async fn mark_read_flips_messages_and_resets_the_counter_together() {
  let messaging = Messaging::new(store().await);
  let conv = seeded_thread(&messaging).await;

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&conv, &abc, "¿Precio?".into()).await.unwrap();
  messaging.record_inbound(&conv, &abc, "¿Y plazo?".into()).await.unwrap();

  let flipped = messaging.mark_read(&conv).await.unwrap();
  assert_eq!(flipped, 2);
  assert_eq!(messaging.total_unread().await.unwrap(), 0);
  let messages = messaging.messages(&conv).await.unwrap();
  assert!(messages.iter().filter(|m| m.kind.is_inbound()).all(|m| m.read));
}

#[tokio::test]
async fn sending_clears_the_senders_unread_counter() {
  let messaging = Messaging::new(store().await);
  let conv = seeded_thread(&messaging).await;

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&conv, &abc, "¿Precio?".into()).await.unwrap();
  assert_eq!(messaging.total_unread().await.unwrap(), 1);

  messaging.send(&conv, &sender(), "Le envío la cotización".into()).await.unwrap();
  assert_eq!(messaging.total_unread().await.unwrap(), 0);
}

#[tokio::test]
async fn conversations_sort_by_most_recent_activity() {
  let messaging = Messaging::new(store().await);
  let first = seeded_thread(&messaging).await;
  let second = seeded_thread(&messaging).await;

  // Newest thread leads until the older one gets a message.
  let listed = messaging.conversations().await.unwrap();
  assert_eq!(listed[0].id, second);

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&first, &abc, "¿Sigue en pie?".into()).await.unwrap();

  let listed = messaging.conversations().await.unwrap();
  assert_eq!(listed[0].id, first);
}

#[tokio::test]
async fn messages_come_back_in_chronological_order() {
  let messaging = Messaging::new(store().await);
  let conv = seeded_thread(&messaging).await;

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&conv, &abc, "uno".into()).await.unwrap();
  messaging.send(&conv, &sender(), "dos".into()).await.unwrap();

  let messages = messaging.messages(&conv).await.unwrap();
  assert_eq!(messages.len(), 3);
  assert!(messages.windows(2).all(|w| w[0].sent_at <= w[1].sent_at));
}

#[tokio::test]
async fn sending_into_a_missing_conversation_is_not_found() {
  let messaging = Messaging::new(store().await);
  let err = messaging
    .send("conv_inexistente", &sender(), "hola".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Store(nexus_core::Error::NotFound { .. })));
}

#[tokio::test]
async fn mark_all_read_drains_every_thread() {
  let messaging = Messaging::new(store().await);
  let a = seeded_thread(&messaging).await;
  let b = seeded_thread(&messaging).await;

  let abc = Sender { id: RecordId::Num(1), name: "Empresa ABC".into() };
  messaging.record_inbound(&a, &abc, "x".into()).await.unwrap();
  messaging.record_inbound(&b, &abc, "y".into()).await.unwrap();
  messaging.record_inbound(&b, &abc, "z".into()).await.unwrap();

  assert_eq!(messaging.mark_all_read().await.unwrap(), 3);
  assert_eq!(messaging.total_unread().await.unwrap(), 0);
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn read_notifications_leave_the_derived_unread_count() {
  let notifications = Notifications::new(store().await);

  let published = notifications
    .publish(NewNotification {
      title:       "T".into(),
      description: "D".into(),
      kind:        NotificationKind::System,
      urgent:      false,
      action:      None,
    })
    .await
    .unwrap();
  assert_eq!(notifications.unread_count().await.unwrap(), 1);

  notifications.mark_read(published.id.as_ref().unwrap()).await.unwrap();
  assert_eq!(notifications.unread_count().await.unwrap(), 0);
}

#[tokio::test]
async fn list_filters_by_kind_and_read_state() {
  let notifications = Notifications::new(store().await);

  notifications
    .publish(NewNotification {
      title:       "Nuevo cliente".into(),
      description: "Empresa XYZ se registró".into(),
      kind:        NotificationKind::Client,
      urgent:      false,
      action:      Some("clientes".into()),
    })
    .await
    .unwrap();
  let system = notifications
    .publish(NewNotification {
      title:       "Backup semanal".into(),
      description: "Toca el respaldo".into(),
      kind:        NotificationKind::System,
      urgent:      true,
      action:      None,
    })
    .await
    .unwrap();
  notifications.mark_read(system.id.as_ref().unwrap()).await.unwrap();

  let clients_only = notifications
    .list(NotificationFilter { kind: Some(NotificationKind::Client), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(clients_only.len(), 1);
  assert_eq!(clients_only[0].icon, "fas fa-users");

  let unread_only = notifications
    .list(NotificationFilter { status: Some(ReadStatus::Unread), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(unread_only.len(), 1);
  assert_eq!(unread_only[0].title, "Nuevo cliente");
}

#[tokio::test]
async fn delete_all_empties_the_collection() {
  let notifications = Notifications::new(store().await);
  for i in 0..3 {
    notifications
      .publish(NewNotification {
        title:       format!("n{i}"),
        description: String::new(),
        kind:        NotificationKind::System,
        urgent:      false,
        action:      None,
      })
      .await
      .unwrap();
  }

  assert_eq!(notifications.delete_all().await.unwrap(), 3);
  assert!(notifications.list(NotificationFilter::default()).await.unwrap().is_empty());
}

// ─── Reports ─────────────────────────────────────────────────────────────────

async fn seed_quote(store: &Arc<SqliteStore>, client_id: &RecordId, date: &str, total: f64) {
  let subtotal = total / 1.12;
  let quote = json!({
    "clienteId": client_id,
    "fecha": date,
    "subtotal": subtotal,
    "impuesto": total - subtotal,
    "total": total,
  });
  let record = record::to_record(&quote).unwrap();
  store.add_item(nexus_core::collection::Collection::Quotes, record).await.unwrap();
}

#[tokio::test]
async fn quote_report_filters_and_totals() {
  let store = store().await;
  let clients = Clients::new(store.clone());
  let reports = Reports::new(store.clone());

  let acme = clients
    .create(NewClient { name: "Acme".into(), ..Default::default() })
    .await
    .unwrap();
  let acme_id = acme.id.unwrap();
  let other = RecordId::Num(999);

  seed_quote(&store, &acme_id, "2024-05-02", 112.0).await;
  seed_quote(&store, &acme_id, "2024-06-10", 224.0).await;
  seed_quote(&store, &other, "2024-05-03", 56.0).await;

  let report = reports
    .quote_report(&QuoteFilter {
      client_id: Some(acme_id.clone()),
      from:      Some("2024-05-01".into()),
      to:        Some("2024-05-31".into()),
    })
    .await
    .unwrap();

  assert_eq!(report.rows.len(), 1);
  assert_eq!(report.rows[0].client_name, "Acme");
  assert!((report.total - 112.0).abs() < 1e-9);

  // The orphaned quote resolves to the placeholder name.
  let everything = reports.quote_report(&QuoteFilter::default()).await.unwrap();
  assert_eq!(everything.rows.len(), 3);
  assert!(everything.rows.iter().any(|r| r.client_name == "N/E"));
}

#[tokio::test]
async fn csv_export_has_header_and_one_line_per_row() {
  let store = store().await;
  let reports = Reports::new(store.clone());
  seed_quote(&store, &RecordId::Num(1), "2024-05-02", 112.0).await;

  let report = reports.quote_report(&QuoteFilter::default()).await.unwrap();
  let csv = crate::reports::to_csv(&report);

  let mut lines = csv.lines();
  assert_eq!(lines.next(), Some("Fecha,ID,Cliente,Subtotal,Impuesto,Total"));
  let row = lines.next().unwrap();
  assert!(row.starts_with("\"2024-05-02\""));
  assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn dashboard_revenue_only_counts_the_trailing_30_days() {
  let store = store().await;
  let clients = Clients::new(store.clone());
  let reports = Reports::new(store.clone());

  let acme = clients
    .create(NewClient { name: "Acme".into(), ..Default::default() })
    .await
    .unwrap();
  let acme_id = acme.id.unwrap();

  let today = chrono::Utc::now().date_naive().to_string();
  seed_quote(&store, &acme_id, &today, 100.0).await;
  seed_quote(&store, &acme_id, "2000-01-01", 400.0).await;

  let stats = reports.dashboard().await.unwrap();
  assert_eq!(stats.clients, 1);
  assert_eq!(stats.quotes, 2);
  assert!((stats.recent_revenue - 100.0).abs() < 1e-9);
}
