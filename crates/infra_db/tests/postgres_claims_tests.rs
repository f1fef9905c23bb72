//! PostgreSQL claims adapter tests
//!
//! These need Docker and are ignored by default:
//! `cargo test -p infra_db -- --ignored`

use std::sync::Arc;

use core_kernel::HealthCheckable;
use domain_claims::{
    ClaimFilter, ClaimNumber, ClaimService, ClaimStatus, ClaimsPort, ListQuery, PageWindow,
    ValidatedClaim,
};
use infra_db::{run_migrations, PostgresClaimsAdapter};
use test_utils::{
    assert_newest_first, db_test, ClaimSubmissionBuilder, IdFixtures, SubmissionFixtures,
    TemporalFixtures,
};

fn validated(builder: ClaimSubmissionBuilder) -> ValidatedClaim {
    domain_claims::validation::validate_submission(&builder.build(), TemporalFixtures::today())
        .expect("valid submission")
}

db_test!(test_create_and_find_one, |pool| {
    let adapter = PostgresClaimsAdapter::new(pool);
    let number: ClaimNumber = "CLM-2026-111111".parse().unwrap();

    let created = adapter
        .create(validated(ClaimSubmissionBuilder::new()).into_new_claim(number))
        .await
        .unwrap();

    assert_eq!(created.claim.status, ClaimStatus::Submitted);
    assert_eq!(created.events.len(), 1);
    assert!(created.claim.assigned_to.is_none());

    let fetched = adapter.find_one(created.id()).await.unwrap().expect("stored claim");
    assert_eq!(fetched.claim.claim_number.as_str(), "CLM-2026-111111");
    assert_eq!(fetched.events.len(), 1);
    assert_eq!(fetched.events[0].message, "Claim submitted");
});

db_test!(test_duplicate_claim_number_is_conflict, |pool| {
    let adapter = PostgresClaimsAdapter::new(pool);
    let number: ClaimNumber = "CLM-2026-222222".parse().unwrap();

    adapter
        .create(validated(ClaimSubmissionBuilder::new()).into_new_claim(number.clone()))
        .await
        .unwrap();
    let err = adapter
        .create(validated(ClaimSubmissionBuilder::random()).into_new_claim(number))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(adapter.count(&ClaimFilter::default()).await.unwrap(), 1);
});

db_test!(test_find_one_unknown_is_none, |pool| {
    let adapter = PostgresClaimsAdapter::new(pool);
    assert!(adapter.find_one(IdFixtures::unknown_claim_id()).await.unwrap().is_none());
});

db_test!(test_search_and_paging, |pool| {
    let adapter = PostgresClaimsAdapter::new(pool);
    for i in 0..7 {
        let number: ClaimNumber = format!("CLM-2026-{}", 300000 + i).parse().unwrap();
        adapter
            .create(validated(ClaimSubmissionBuilder::random().policy_number(format!("PA-{}", i))).into_new_claim(number))
            .await
            .unwrap();
    }
    adapter
        .create(validated(ClaimSubmissionBuilder::new()).into_new_claim("CLM-2026-399999".parse().unwrap()))
        .await
        .unwrap();

    let all = ClaimFilter::default();
    assert_eq!(adapter.count(&all).await.unwrap(), 8);

    let first = adapter.find_many(&all, PageWindow { skip: 0, take: 5 }).await.unwrap();
    let rest = adapter.find_many(&all, PageWindow { skip: 5, take: 5 }).await.unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(rest.len(), 3);
    assert_newest_first(&first);

    let rivers = ClaimFilter::default().with_search("RIVERS");
    assert_eq!(adapter.count(&rivers).await.unwrap(), 1);

    let wildcard = ClaimFilter::default().with_search("%");
    assert_eq!(adapter.count(&wildcard).await.unwrap(), 0);

    let homeowners = ClaimFilter::default().with_lob("Homeowners");
    assert_eq!(adapter.count(&homeowners).await.unwrap(), 8);
});

db_test!(test_service_over_postgres, |pool| {
    run_migrations(&pool).await.expect("migrations are idempotent over the seeded schema");
    let adapter = PostgresClaimsAdapter::new(pool);
    assert!(adapter.health_check().await.is_serving());

    let service = ClaimService::new(Arc::new(adapter));
    let body = SubmissionFixtures::as_json(&SubmissionFixtures::jordan_smith());
    let created = service.submit(&body).await.unwrap();

    let page = service.list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, created.id());

    let fetched = service.get(&created.id().as_uuid().to_string()).await.unwrap();
    assert_eq!(fetched.claim, created.claim);
});
