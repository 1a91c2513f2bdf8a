#[path = "../common/mod.rs"]
mod common;

use pn532prov::config::ProvisioningConfig;
use pn532prov::device::Device;
use pn532prov::provisioning::{CycleOutcome, Provisioner, Step};
use pn532prov::test_support::{CallLog, RecordingCloud, RecordingNetwork, RecordingStore, SharedTransport};
use pn532prov::transport::MockTransport;
use pn532prov::ErrorKind;

#[test]
fn tap_provisions_and_joins_once() {
    let (mut p, shared, log) = common::provisioner();
    // realistic answers for the middle steps
    shared.push_ack_and_frame(&common::fixtures::one_target_payload());
    shared.push_ack_and_frame(&common::fixtures::exchange_ok_payload());
    shared.push_ack_and_frame(&common::fixtures::exchange_ok_payload());
    shared.push_ack_and_frame(&common::fixtures::capability_container_payload());
    shared.push_ack_and_frame(&common::fixtures::exchange_ok_payload());
    shared.push_ack_and_frame(&common::fixtures::nlen_payload());
    shared.push_ack_and_frame(&common::fixtures::text_record_payload());

    let report = p.poll_once().unwrap();
    let order: Vec<Step> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(order, Step::SEQUENCE.to_vec());
    assert!(report.steps.iter().all(|s| s.is_success()));

    match report.outcome {
        CycleOutcome::Joined(ref creds) => {
            assert_eq!(creds.ssid(), "MyNetwork");
            assert_eq!(creds.password(), "Sup3rSecret");
        }
        ref other => panic!("unexpected outcome {:?}", other),
    }

    let calls = log.calls();
    let flag = calls.iter().position(|c| c == "set_provisioning_flag").unwrap();
    let join = calls.iter().position(|c| c.starts_with("connect")).unwrap();
    assert!(flag < join);
    assert_eq!(log.count("connect"), 1);
    assert_eq!(calls[join], "connect MyNetwork");
    assert!(p.state().is_connected());
    assert!(p.state().is_retired());
}

#[test]
fn every_apdu_went_to_the_inlisted_target() {
    let (mut p, shared, _log) = common::provisioner();
    let before = shared.sent().len();
    common::queue_tap(&shared, b"lab?pw");
    p.poll_once().unwrap();

    let frames = shared.sent();
    let exchanges = &frames[before + 1..];
    assert_eq!(exchanges.len(), 6);
    for (frame, step) in exchanges.iter().zip(Step::SEQUENCE) {
        // 00 00 FF LEN LCS D4 40 Tg apdu.. DCS 00
        assert_eq!(&frame[5..8], &[0xD4, 0x40, 0x01]);
        assert_eq!(&frame[8..frame.len() - 2], step.apdu());
    }
}

#[test]
fn first_readiness_timeout_means_no_join() {
    common::init_logging();
    let log = CallLog::default();
    let shared = SharedTransport::new(MockTransport::new());
    let outcome = Device::new_with_transport(Box::new(shared.clone()))
        .initialize()
        .and_then(|device| {
            let mut p = Provisioner::new(
                device,
                RecordingNetwork::new(log.clone()),
                RecordingStore::new(log.clone()),
                RecordingCloud::new(log.clone()),
            );
            p.start()
        });
    let err = outcome.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    // wake and firmware exchanges each polled through their whole budget
    assert_eq!(shared.status_polls(), 202);
    assert_eq!(log.count("connect"), 0);
}

#[test]
fn enumeration_timeout_means_no_join() {
    let (mut p, shared, log) = common::provisioner();
    let err = p.poll_once().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    // init frames plus the one enumeration attempt
    assert_eq!(shared.sent().len(), 4);
    assert!(log.calls().is_empty());
}

#[test]
fn older_revision_space_delimiter() {
    let (device, shared) = pn532prov::test_support::initialized_device();
    let log = CallLog::default();
    let mut p = Provisioner::with_config(
        device,
        RecordingNetwork::new(log.clone()),
        RecordingStore::new(log.clone()),
        RecordingCloud::new(log.clone()),
        ProvisioningConfig::immediate().with_delimiter(b' '),
    );
    common::queue_tap(&shared, b"office pass word");
    let report = p.poll_once().unwrap();
    match report.outcome {
        CycleOutcome::Joined(creds) => assert_eq!(creds.password(), "pass word"),
        other => panic!("unexpected outcome {:?}", other),
    }
}
