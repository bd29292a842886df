use crate::infra::{InMemoryBidRepository, InMemoryNotificationPublisher};
use clap::Args;
use std::sync::Arc;
use tender_desk::error::AppError;
use tender_desk::workflows::tender::bids::{
    classify_stage, stage_status, validate_scores, weighted_total, BidEvaluationService, BidId,
    BidServiceError, BidSubmission, EvaluationRequest, EvaluationScores, EvaluatorId, TenderId,
    TenderSnapshot, TenderStatus,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Technical component score (0-100)
    #[arg(long)]
    pub(crate) technical: f64,
    /// Financial component score (0-100)
    #[arg(long)]
    pub(crate) financial: f64,
    /// Experience component score (0-100)
    #[arg(long)]
    pub(crate) experience: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the award portion of the demo
    #[arg(long)]
    pub(crate) skip_award: bool,
}

/// Classify a score triple exactly as the evaluation endpoint would, without
/// touching any storage.
pub(crate) fn run_score_preview(args: ScoreArgs) -> Result<(), AppError> {
    let scores = EvaluationScores {
        technical: args.technical,
        financial: args.financial,
        experience: args.experience,
    };
    validate_scores(&scores).map_err(BidServiceError::from)?;

    let stage = classify_stage(&scores);
    let status = stage_status(stage);

    println!("Score preview");
    println!(
        "Components: technical {} | financial {} | experience {}",
        args.technical, args.financial, args.experience
    );
    println!("Weighted total: {:.2}", weighted_total(&scores));
    println!("Stage: {}", stage.label());
    println!("Bid status: {}", status.label());

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let tender = TenderSnapshot {
        tender_id: TenderId("tender-demo-2026".to_string()),
        title: "Civic Center Renovation".to_string(),
        status: TenderStatus::Open,
    };

    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let service = Arc::new(BidEvaluationService::new(
        Arc::new(InMemoryBidRepository::default()),
        notifier.clone(),
    ));

    println!("Tender bid evaluation demo");
    println!("Tender: {} ({})", tender.title, tender.tender_id);

    let entrants = [
        ("vendor-atlas", 455_000.0, (88.0, 92.0, 85.0)),
        ("vendor-borealis", 430_000.0, (74.0, 76.0, 70.0)),
        ("vendor-cirrus", 395_000.0, (62.0, 64.0, 60.0)),
        ("vendor-dunlin", 512_000.0, (48.0, 52.0, 55.0)),
    ];

    let officer = EvaluatorId("officer-demo".to_string());
    let mut winner: Option<BidId> = None;

    println!("\nIntake and evaluation");
    for (bidder, amount, (technical, financial, experience)) in entrants {
        let record = service.submit(BidSubmission {
            tender: tender.clone(),
            bidder_id: bidder.to_string(),
            amount,
        })?;

        let outcome = service.evaluate(
            &officer,
            EvaluationRequest {
                bid_id: record.bid_id.0.clone(),
                tender_id: tender.tender_id.0.clone(),
                technical_score: technical,
                financial_score: financial,
                experience_score: experience,
                comments: None,
            },
        )?;

        println!(
            "- {} -> {} | total {:.1} | stage {} | status {}",
            bidder,
            record.bid_id,
            outcome.total_score,
            outcome.stage.label(),
            outcome.status.label()
        );

        if winner.is_none() {
            winner = Some(record.bid_id.clone());
        }
    }

    println!("\nShortlisted candidates");
    let shortlisted = service.shortlisted(&tender.tender_id)?;
    if shortlisted.is_empty() {
        println!("- none");
    }
    for record in &shortlisted {
        let view = record.status_view();
        println!("- {} | {}", view.bid_id, view.rationale);
    }

    if !args.skip_award {
        if let Some(winning_bid) = winner {
            let awarded = service.award(&tender.tender_id, &winning_bid)?;
            println!("\nAward");
            println!(
                "- winner {} ({}) -> status {}",
                awarded.bid_id,
                awarded.bidder_id,
                awarded.status.label()
            );

            for record in service.bids_for_tender(&tender.tender_id)? {
                if record.bid_id != awarded.bid_id {
                    println!("- {} -> status {}", record.bid_id, record.status.label());
                }
            }
        }
    }

    println!("\nNotifications dispatched");
    for event in notifier.events() {
        println!("- [{:?}] {} -> {}", event.kind, event.recipient, event.message);
    }

    Ok(())
}
