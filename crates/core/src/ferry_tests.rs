use super::*;
use crate::log::MemorySink;
use crate::vehicle::{Port, VehicleId};
use crate::worker::{run_vehicle, Origin};

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .unwrap();
}

fn ferry(state: &Arc<SharedState>) -> FerryController {
    FerryController::new(Arc::clone(state), WorkerRng::for_ferry(3), Duration::ZERO)
}

/// Spawn vehicles at fixed ports and wait until all of them are parked
async fn park(
    state: &Arc<SharedState>,
    vehicles: &[(VehicleKind, u32, Port)],
) -> Vec<tokio::task::JoinHandle<Result<(), ProtocolError>>> {
    let handles = vehicles
        .iter()
        .map(|&(kind, number, port)| {
            let id = VehicleId::new(kind, number);
            tokio::spawn(run_vehicle(
                id,
                Arc::clone(state),
                WorkerRng::for_vehicle(3, id),
                Duration::ZERO,
                Origin::Fixed(port),
            ))
        })
        .collect();
    let expected = vehicles.len() as u32;
    wait_until(|| state.snapshot().total_waiting() == expected).await;
    handles
}

fn ferry_lines(sink: &MemorySink) -> Vec<String> {
    sink.lines()
        .into_iter()
        .filter(|line| line.contains(": P: "))
        .collect()
}

#[tokio::test]
async fn empty_run_finishes_on_first_arrival() {
    let sink = MemorySink::new();
    let state = Arc::new(SharedState::new(3, 0, sink.clone()));
    let mut ferry = ferry(&state);

    let mut phases = vec![ferry.phase()];
    while ferry.phase() != FerryPhase::Finished {
        phases.push(ferry.step().await.unwrap());
    }

    assert_eq!(
        phases,
        vec![
            FerryPhase::Started,
            FerryPhase::Arrive,
            FerryPhase::Unload,
            FerryPhase::CheckDone,
            FerryPhase::Finished,
        ]
    );
    assert_eq!(sink.lines(), vec!["1: P: started", "2: P: arrived to 0", "3: P: finish"]);
    assert_eq!(ferry.stats().arrivals, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_car_takes_two_arrivals() {
    let sink = MemorySink::new();
    let state = Arc::new(SharedState::new(3, 1, sink.clone()));
    let handles = park(&state, &[(VehicleKind::Car, 1, Port::WEST)]).await;

    let stats = ferry(&state).run().await.unwrap();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(
        sink.lines(),
        vec![
            "1: O 1: started",
            "2: O 1: arrived to 0",
            "3: P: started",
            "4: P: arrived to 0",
            "5: O 1: boarding",
            "6: P: leaving 0",
            "7: P: arrived to 1",
            "8: O 1: leaving in 1",
            "9: P: finish",
        ]
    );
    assert_eq!(
        stats,
        FerryStats {
            arrivals: 2,
            trucks_carried: 0,
            cars_carried: 1,
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn truck_that_does_not_fit_waits_for_next_visit() {
    let sink = MemorySink::new();
    let state = Arc::new(SharedState::new(3, 2, sink.clone()));
    let handles = park(
        &state,
        &[(VehicleKind::Truck, 1, Port::WEST), (VehicleKind::Truck, 2, Port::WEST)],
    )
    .await;

    let stats = ferry(&state).run().await.unwrap();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(stats.arrivals, 4);
    assert_eq!(stats.trucks_carried, 2);
    assert_eq!(
        ferry_lines(&sink)
            .iter()
            .map(|l| l.split_once(": ").map(|(_, rest)| rest.to_string()).unwrap_or_default())
            .collect::<Vec<_>>(),
        vec![
            "P: started",
            "P: arrived to 0",
            "P: leaving 0",
            "P: arrived to 1",
            "P: leaving 1",
            "P: arrived to 0",
            "P: leaving 0",
            "P: arrived to 1",
            "P: finish",
        ]
    );

    let counters = state.snapshot();
    assert_eq!(counters.total_waiting(), 0);
    assert_eq!(counters.total_unloaded, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mixed_load_respects_capacity_and_alternation() {
    let sink = MemorySink::new();
    let state = Arc::new(SharedState::new(5, 4, sink.clone()));
    let handles = park(
        &state,
        &[
            (VehicleKind::Truck, 1, Port::WEST),
            (VehicleKind::Truck, 2, Port::WEST),
            (VehicleKind::Car, 1, Port::WEST),
            (VehicleKind::Car, 2, Port::WEST),
        ],
    )
    .await;

    let stats = ferry(&state).run().await.unwrap();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // First visit: truck, car, then only a car fits
    assert_eq!(stats.trucks_carried, 2);
    assert_eq!(stats.cars_carried, 2);
    let lines = sink.lines();
    let first_leave = lines.iter().position(|l| l.ends_with("P: leaving 0")).unwrap();
    let boarded_first: Vec<_> = lines[..first_leave]
        .iter()
        .filter(|l| l.ends_with("boarding"))
        .collect();
    assert_eq!(boarded_first.len(), 3);
}
