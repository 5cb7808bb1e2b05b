// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use obtrack::ObligationStep;
use obtrack_domain::{
    ActorRole, Frequency, ObligationField, ObligationImport, ObligationStatus, Program,
};

use super::helpers::{
    RecordingHandler, create_test_actor, create_test_admin, create_test_importer,
    obligations_csv, test_today,
};
use crate::{ApiError, ObligationBatch, ObligationImporter, ObligationStateResponse};

async fn create_review_importer() -> ObligationImporter {
    let mut importer: ObligationImporter = create_test_importer();
    importer.open(&create_test_admin(), "c-1").unwrap();
    importer
        .select_file("obligaciones.csv", obligations_csv())
        .await
        .unwrap();
    importer.advance().unwrap();
    importer
}

#[tokio::test]
async fn test_open_requires_company_info_role() {
    let mut importer: ObligationImporter = create_test_importer();

    let err: ApiError = importer
        .open(&create_test_actor(ActorRole::ClienteMiembro), "c-1")
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err: ApiError = importer.open(&create_test_admin(), "  ").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
    assert_eq!(importer.session().step, ObligationStep::Closed);

    importer
        .open(&create_test_actor(ActorRole::ClienteAdmin), "c-1")
        .unwrap();
    assert_eq!(importer.company_id(), Some("c-1"));
}

#[tokio::test]
async fn test_decode_seeds_mapping_from_headers() {
    let mut importer: ObligationImporter = create_test_importer();
    importer.open(&create_test_admin(), "c-1").unwrap();

    importer
        .select_file("obligaciones.csv", obligations_csv())
        .await
        .unwrap();

    let mapping = &importer.session().mapping;
    assert_eq!(importer.session().step, ObligationStep::Map);
    assert_eq!(mapping["Programa"], ObligationField::Program);
    assert_eq!(mapping["Tipo de obligacion"], ObligationField::ObligationType);
    assert_eq!(mapping["Fecha limite"], ObligationField::SubmissionDate);
    assert_eq!(mapping["Estado"], ObligationField::Status);
    assert_eq!(mapping["Frecuencia"], ObligationField::Frequency);
}

#[tokio::test]
async fn test_review_defaults_bad_values_in_place() {
    let importer: ObligationImporter = create_review_importer().await;

    let review: ObligationImport = importer.review(test_today());

    assert_eq!(review.obligations.len(), 2);
    assert_eq!(review.errors.len(), 5);

    let corrected = &review.obligations[1];
    assert_eq!(corrected.obligation_type, "Inventario");
    assert_eq!(corrected.program, Program::General);
    assert_eq!(corrected.submission_date, "2026-01-05");
    assert_eq!(corrected.status, ObligationStatus::Compliant);
    assert_eq!(corrected.frequency, Frequency::Other);
}

#[tokio::test]
async fn test_override_mapping_changes_review() {
    let mut importer: ObligationImporter = create_review_importer().await;
    importer.back().unwrap();

    importer
        .set_mapping("Frecuencia", ObligationField::Ignore)
        .unwrap();
    importer.advance().unwrap();

    let review: ObligationImport = importer.review(test_today());
    assert_eq!(review.errors.len(), 4);
    assert_eq!(review.obligations[0].frequency, Frequency::Other);
}

#[tokio::test]
async fn test_finish_hands_off_despite_advisory_errors() {
    let mut importer: ObligationImporter = create_review_importer().await;
    let mut handler: RecordingHandler = RecordingHandler::default();

    let batch: ObligationBatch = importer.finish(test_today(), &mut handler).unwrap();

    assert_eq!(batch.company_id, "c-1");
    assert_eq!(batch.obligations.len(), 2);
    assert_eq!(handler.batches, vec![batch]);
    assert_eq!(importer.session().step, ObligationStep::Closed);
    assert_eq!(importer.company_id(), None);
}

#[tokio::test]
async fn test_finish_before_review_is_rejected() {
    let mut importer: ObligationImporter = create_review_importer().await;
    importer.back().unwrap();
    let mut handler: RecordingHandler = RecordingHandler::default();

    let err: ApiError = importer.finish(test_today(), &mut handler).unwrap_err();

    assert!(matches!(err, ApiError::InvalidTransition { .. }));
    assert!(handler.batches.is_empty());
}

#[tokio::test]
async fn test_rejected_batch_keeps_importer_on_review() {
    let mut importer: ObligationImporter = create_review_importer().await;
    let mut handler: RecordingHandler = RecordingHandler {
        reject: true,
        ..RecordingHandler::default()
    };

    let err: ApiError = importer.finish(test_today(), &mut handler).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(importer.session().step, ObligationStep::Review);
}

#[tokio::test]
async fn test_state_response_on_review() {
    let importer: ObligationImporter = create_review_importer().await;

    let state: ObligationStateResponse = importer.state_response(test_today());

    assert_eq!(state.step, 3);
    assert_eq!(state.company_id.as_deref(), Some("c-1"));
    assert_eq!(state.headers.len(), 5);
    assert_eq!(state.review.unwrap().obligations.len(), 2);
    assert_eq!(state.messages.len(), 5);
    assert_eq!(state.field_options[3], "submissionDate");
}

#[tokio::test]
async fn test_reopen_for_another_company_starts_over() {
    let mut importer: ObligationImporter = create_review_importer().await;
    assert_eq!(importer.company_id(), Some("c-1"));

    importer.open(&create_test_admin(), "c-2").unwrap();

    assert_eq!(importer.session().step, ObligationStep::Upload);
    assert!(importer.session().sheet.is_none());
    assert_eq!(importer.company_id(), Some("c-2"));
}
