use super::*;

use crate::database::FilmlogDatabase;
use crate::test_util::*;
use filmlog::error::FilmlogError;

async fn update(
    db: &DatabaseConnection,
    roll_id: i64,
    changes: RollChanges,
    today: NaiveDate,
) -> ServerResult<SavedRoll> {
    save_roll(db, OWNER, Some(roll_id), changes, today).await
}

fn status(status: RollStatus) -> RollChanges {
    RollChanges {
        status: Some(status),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_roll() {
    let (db, catalog) = database().await;

    let saved = new_roll(&db, OWNER, &catalog.c41).await;

    assert_eq!(RollStatus::Storage, saved.roll.status().unwrap());
    assert_eq!("", saved.roll.code);
    assert_eq!(None, saved.roll.started_on);
    assert!(saved.events.is_empty());

    let err = save_roll(&db, OWNER, None, RollChanges::default(), date(2023, 6, 17))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::RequestError(_)));

    let changes = RollChanges {
        film_id: Some(9999),
        ..Default::default()
    };
    let err = save_roll(&db, OWNER, None, changes, date(2023, 6, 17))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchFilm));
}

#[tokio::test]
async fn test_code_sequence() {
    let (db, catalog) = database().await;

    let films = [
        (&catalog.e6, OWNER, "35-e6-1"),
        (&catalog.c41, OWNER, "35-c41-1"),
        (&catalog.e6, OWNER, "35-e6-2"),
        (&catalog.c41, OWNER, "35-c41-2"),
        (&catalog.bw, OWNER, "35-bw-1"),
        (&catalog.bw, OTHER_OWNER, "35-bw-1"),
        (&catalog.stocked, OWNER, "120-c41-1"),
    ];

    for (day, (film, owner, code)) in films.into_iter().enumerate() {
        let roll = new_roll(&db, owner, film).await;
        let started_on = date(2023, 3, 1 + day as u32);
        let saved = start_roll(&db, owner, roll.roll.id, None, started_on).await;

        assert_eq!(code, saved.roll.code);
        assert_eq!(RollStatus::Loaded, saved.roll.status().unwrap());
        assert_eq!(Some(started_on), saved.roll.started_on);
        assert_eq!(
            vec![
                LifecycleEvent::CodeAssigned {
                    code: code.to_string()
                },
                LifecycleEvent::Promoted,
            ],
            saved.events
        );
    }

    // The sequence restarts every year
    let roll = new_roll(&db, OWNER, &catalog.e6).await;
    let saved = start_roll(&db, OWNER, roll.roll.id, None, date(2024, 1, 2)).await;
    assert_eq!("35-e6-1", saved.roll.code);
}

#[tokio::test]
async fn test_stock_overrides_film() {
    let (db, catalog) = database().await;

    let roll = new_roll(&db, OWNER, &catalog.stocked).await;
    assert_eq!(400, roll.film.iso);

    let info = roll.roll.to_roll_info(&roll.film).unwrap();
    assert_eq!(400, info.effective_iso);
}

#[tokio::test]
async fn test_start_loads_camera() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let saved = start_roll(&db, OWNER, roll.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    assert!(saved.events.contains(&LifecycleEvent::CameraLoaded {
        camera_id: camera.id
    }));

    let camera = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Loaded, camera.status().unwrap());
    assert_eq!(Some(saved.roll.id), camera.loaded_roll_id);
}

#[tokio::test]
async fn test_noop_save() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let started = start_roll(&db, OWNER, roll.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    let saved = update(&db, started.roll.id, RollChanges::default(), date(2023, 6, 20))
        .await
        .unwrap();

    assert!(saved.events.is_empty());
    assert_eq!(started.roll.code, saved.roll.code);
    assert_eq!(started.roll.status, saved.roll.status);
    assert_eq!(started.roll.camera_id, saved.roll.camera_id);
    assert_eq!(None, saved.roll.ended_on);
}

#[tokio::test]
async fn test_shot_and_reload() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let roll_id = roll.roll.id;
    start_roll(&db, OWNER, roll_id, Some(camera.id), date(2023, 6, 17)).await;

    // Finished rolls are taken out of the camera
    let shot = update(&db, roll_id, status(RollStatus::Shot), date(2023, 7, 1))
        .await
        .unwrap();

    assert_eq!(RollStatus::Shot, shot.roll.status().unwrap());
    assert_eq!(Some(date(2023, 7, 1)), shot.roll.ended_on);
    assert_eq!(Some(camera.id), shot.roll.camera_id);

    let reloaded = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Empty, reloaded.status().unwrap());
    assert_eq!(None, reloaded.loaded_roll_id);
    assert_eq!(1, db.count_finished_rolls(camera.id).await.unwrap());

    // Moving it back puts it in the camera again
    let loaded = update(&db, roll_id, status(RollStatus::Loaded), date(2023, 7, 2))
        .await
        .unwrap();

    assert_eq!(None, loaded.roll.ended_on);
    assert_eq!("35-c41-1", loaded.roll.code);
    assert!(loaded.events.contains(&LifecycleEvent::Reopened));

    let reloaded = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(Some(roll_id), reloaded.loaded_roll_id);
    assert_eq!(0, db.count_finished_rolls(camera.id).await.unwrap());
}

#[tokio::test]
async fn test_reset_to_storage() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let roll_id = roll.roll.id;
    start_roll(&db, OWNER, roll_id, Some(camera.id), date(2023, 6, 17)).await;

    let changes = RollChanges {
        push_pull: Some(PushPull::Push1),
        ..Default::default()
    };
    update(&db, roll_id, changes, date(2023, 6, 18))
        .await
        .unwrap();

    let reset = update(&db, roll_id, status(RollStatus::Storage), date(2023, 6, 19))
        .await
        .unwrap();

    assert_eq!(RollStatus::Storage, reset.roll.status().unwrap());
    assert_eq!("", reset.roll.code);
    assert_eq!(None, reset.roll.camera_id);
    assert_eq!(None, reset.roll.started_on);
    assert_eq!(PushPull::None, reset.roll.push_pull().unwrap());
    assert!(reset.events.contains(&LifecycleEvent::Reset));

    let camera = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Empty, camera.status().unwrap());

    // Starting it again assigns a fresh code
    let restarted = start_roll(&db, OWNER, roll_id, None, date(2023, 8, 1)).await;
    assert_eq!("35-c41-1", restarted.roll.code);
}

#[tokio::test]
async fn test_missing_start_date() {
    let (db, catalog) = database().await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let err = update(&db, roll.roll.id, status(RollStatus::Shot), date(2023, 6, 17))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::MissingStartDate { .. })
    ));
}

#[tokio::test]
async fn test_push_pull() {
    let (db, catalog) = database().await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;

    let changes = RollChanges {
        push_pull: Some("+2".parse().unwrap()),
        ..Default::default()
    };
    let saved = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap();

    assert_eq!("+2", saved.roll.push_pull);
    let info = saved.roll.to_roll_info(&saved.film).unwrap();
    assert_eq!(1600, info.effective_iso);

    let changes = RollChanges {
        push_pull: Some("0".parse().unwrap()),
        ..Default::default()
    };
    let saved = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap();

    assert_eq!("", saved.roll.push_pull);
    let info = saved.roll.to_roll_info(&saved.film).unwrap();
    assert_eq!(400, info.effective_iso);
}

#[tokio::test]
async fn test_camera_occupied() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let first = new_roll(&db, OWNER, &catalog.c41).await;
    start_roll(&db, OWNER, first.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    let second = new_roll(&db, OWNER, &catalog.c41).await;
    let changes = RollChanges {
        camera_id: Some(Some(camera.id)),
        started_on: Some(Some(date(2023, 6, 18))),
        ..Default::default()
    };
    let err = update(&db, second.roll.id, changes, date(2023, 6, 18))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::CameraOccupied { roll_id }) if *roll_id == first.roll.id
    ));

    // Nothing was written
    let second = db.find_roll(OWNER, second.roll.id, false).await.unwrap();
    assert_eq!("", second.code);
    assert_eq!(None, second.camera_id);
    assert_eq!(RollStatus::Storage, second.status().unwrap());
}

#[tokio::test]
async fn test_move_between_cameras() {
    let (db, catalog) = database().await;
    let old_camera = create_camera(&db, OWNER, "135", false).await;
    let new_camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    start_roll(&db, OWNER, roll.roll.id, Some(old_camera.id), date(2023, 6, 17)).await;

    let changes = RollChanges {
        camera_id: Some(Some(new_camera.id)),
        ..Default::default()
    };
    let saved = update(&db, roll.roll.id, changes, date(2023, 6, 18))
        .await
        .unwrap();

    assert_eq!(Some(new_camera.id), saved.roll.camera_id);

    let old_camera = db.find_camera(OWNER, old_camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Empty, old_camera.status().unwrap());
    assert_eq!(None, old_camera.loaded_roll_id);

    let new_camera = db.find_camera(OWNER, new_camera.id, false).await.unwrap();
    assert_eq!(Some(roll.roll.id), new_camera.loaded_roll_id);
}

#[tokio::test]
async fn test_camera_backs() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "120", true).await;
    let back_a = create_camera_back(&db, &camera).await;
    let back_b = create_camera_back(&db, &camera).await;

    let conn = &db;
    let start = |roll_id: i64, back_id: i64| {
        let changes = RollChanges {
            camera_id: Some(Some(camera.id)),
            camera_back_id: Some(Some(back_id)),
            started_on: Some(Some(date(2023, 6, 17))),
            ..Default::default()
        };
        update(conn, roll_id, changes, date(2023, 6, 17))
    };

    let first = new_roll(&db, OWNER, &catalog.stocked).await;
    let second = new_roll(&db, OWNER, &catalog.stocked).await;
    let third = new_roll(&db, OWNER, &catalog.stocked).await;

    start(first.roll.id, back_a.id).await.unwrap();

    // The camera itself does not block other backs
    let saved = start(second.roll.id, back_b.id).await.unwrap();
    assert!(saved.events.contains(&LifecycleEvent::CameraBackLoaded {
        camera_back_id: back_b.id
    }));

    let err = start(third.roll.id, back_a.id).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::CameraBackOccupied { .. })
    ));

    // Finishing a roll frees its back
    update(&db, first.roll.id, status(RollStatus::Shot), date(2023, 6, 20))
        .await
        .unwrap();

    let back_a = db.find_camera_back(OWNER, back_a.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Empty, back_a.status().unwrap());

    let back_b = db.find_camera_back(OWNER, back_b.id, false).await.unwrap();
    assert_eq!(Some(second.roll.id), back_b.loaded_roll_id);

    start(third.roll.id, back_a.id).await.unwrap();
}

#[tokio::test]
async fn test_camera_back_mismatch() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "120", true).await;
    let other_camera = create_camera(&db, OWNER, "120", true).await;
    let back = create_camera_back(&db, &other_camera).await;

    let roll = new_roll(&db, OWNER, &catalog.stocked).await;
    let changes = RollChanges {
        camera_id: Some(Some(camera.id)),
        camera_back_id: Some(Some(back.id)),
        ..Default::default()
    };
    let err = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::CameraBackMismatch));

    let changes = RollChanges {
        camera_back_id: Some(Some(back.id)),
        ..Default::default()
    };
    let err = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::CameraBackWithoutCamera)
    ));
}

#[tokio::test]
async fn test_owner_isolation() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OTHER_OWNER, "135", false).await;
    let project = create_project(&db, OTHER_OWNER).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;

    let err = save_roll(
        &db,
        OTHER_OWNER,
        Some(roll.roll.id),
        RollChanges::default(),
        date(2023, 6, 17),
    )
    .await
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchRoll));

    let changes = RollChanges {
        camera_id: Some(Some(camera.id)),
        ..Default::default()
    };
    let err = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchCamera));

    let changes = RollChanges {
        project_id: Some(Some(project.id)),
        ..Default::default()
    };
    let err = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchProject));
}

#[tokio::test]
async fn test_save_after_camera_was_emptied_by_hand() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let first = new_roll(&db, OWNER, &catalog.c41).await;
    start_roll(&db, OWNER, first.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    set_camera_status(&db, OWNER, camera.id, EquipmentStatus::Empty)
        .await
        .unwrap();

    let second = new_roll(&db, OWNER, &catalog.c41).await;
    start_roll(&db, OWNER, second.roll.id, Some(camera.id), date(2023, 6, 18)).await;

    // The first roll still points at the camera, but only its notes change
    let changes = RollChanges {
        notes: Some("Beach".to_string()),
        ..Default::default()
    };
    let saved = update(&db, first.roll.id, changes, date(2023, 6, 19))
        .await
        .unwrap();

    assert!(saved.events.is_empty());
    assert_eq!("Beach", saved.roll.notes);
    assert_eq!(RollStatus::Loaded, saved.roll.status().unwrap());
    assert_eq!(Some(camera.id), saved.roll.camera_id);

    let camera = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Loaded, camera.status().unwrap());
    assert_eq!(Some(second.roll.id), camera.loaded_roll_id);
}

#[tokio::test]
async fn test_malformed_stored_code() {
    let (db, catalog) = database().await;

    let saved = new_roll(&db, OWNER, &catalog.c41).await;
    let started = start_roll(&db, OWNER, saved.roll.id, None, date(2023, 6, 17)).await;
    started.roll.state().unwrap();

    let corrupted = roll::ActiveModel {
        id: Set(started.roll.id),
        code: Set("35-k14-1".to_string()),
        ..Default::default()
    }
    .update(&db)
    .await
    .unwrap();

    let err = corrupted.state().unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::InvalidRollCode { .. })
    ));

    let err = update(&db, started.roll.id, RollChanges::default(), date(2023, 6, 18))
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::FilmlogError(FilmlogError::InvalidRollCode { .. })
    ));
}

#[tokio::test]
async fn test_unavailable_camera() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let camera = set_camera_status(&db, OWNER, camera.id, EquipmentStatus::Unavailable)
        .await
        .unwrap();
    assert_eq!(EquipmentStatus::Unavailable, camera.status().unwrap());

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let saved = start_roll(&db, OWNER, roll.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    assert_eq!(RollStatus::Loaded, saved.roll.status().unwrap());
    assert!(!saved.events.contains(&LifecycleEvent::CameraLoaded {
        camera_id: camera.id
    }));

    let camera = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Unavailable, camera.status().unwrap());
    assert_eq!(None, camera.loaded_roll_id);
}

#[tokio::test]
async fn test_set_camera_back_status() {
    let (db, _) = database().await;
    let camera = create_camera(&db, OWNER, "120", true).await;
    let other_camera = create_camera(&db, OWNER, "120", true).await;
    let back = create_camera_back(&db, &camera).await;

    let updated = set_camera_back_status(
        &db,
        OWNER,
        camera.id,
        back.id,
        EquipmentStatus::Unavailable,
    )
    .await
    .unwrap();
    assert_eq!(EquipmentStatus::Unavailable, updated.status().unwrap());

    let err = set_camera_back_status(
        &db,
        OWNER,
        other_camera.id,
        back.id,
        EquipmentStatus::Empty,
    )
    .await
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchCameraBack));

    let err = set_camera_back_status(&db, OTHER_OWNER, camera.id, back.id, EquipmentStatus::Empty)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchCameraBack));
}

#[tokio::test]
async fn test_delete_unloads() {
    let (db, catalog) = database().await;
    let camera = create_camera(&db, OWNER, "135", false).await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    start_roll(&db, OWNER, roll.roll.id, Some(camera.id), date(2023, 6, 17)).await;

    let err = delete_roll(&db, OTHER_OWNER, roll.roll.id)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchRoll));

    delete_roll(&db, OWNER, roll.roll.id).await.unwrap();

    let camera = db.find_camera(OWNER, camera.id, false).await.unwrap();
    assert_eq!(EquipmentStatus::Empty, camera.status().unwrap());
    assert_eq!(None, camera.loaded_roll_id);

    let err = db.find_roll(OWNER, roll.roll.id, false).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoSuchRoll));
}

#[tokio::test]
async fn test_rolls_remaining() {
    let (db, catalog) = database().await;
    let project = create_project(&db, OWNER).await;

    let mut roll_ids = Vec::new();
    for _ in 0..3 {
        let roll = new_roll(&db, OWNER, &catalog.bw).await;
        let changes = RollChanges {
            project_id: Some(Some(project.id)),
            ..Default::default()
        };
        let saved = update(&db, roll.roll.id, changes, date(2023, 6, 17))
            .await
            .unwrap();
        assert_eq!(Some(project.id), saved.roll.project_id);
        roll_ids.push(saved.roll.id);
    }

    assert_eq!(3, db.count_rolls_remaining(project.id).await.unwrap());

    start_roll(&db, OWNER, roll_ids[0], None, date(2023, 6, 17)).await;
    assert_eq!(2, db.count_rolls_remaining(project.id).await.unwrap());

    let changes = RollChanges {
        project_id: Some(None),
        ..Default::default()
    };
    let saved = update(&db, roll_ids[1], changes, date(2023, 6, 17))
        .await
        .unwrap();
    assert_eq!(None, saved.roll.project_id);
    assert_eq!(1, db.count_rolls_remaining(project.id).await.unwrap());
}

#[tokio::test]
async fn test_descriptive_fields() {
    let (db, catalog) = database().await;

    let roll = new_roll(&db, OWNER, &catalog.c41).await;
    let changes = RollChanges {
        lens: Some("50mm f/1.4".to_string()),
        notes: Some("Summer trip".to_string()),
        ..Default::default()
    };
    update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap();

    let changes = RollChanges {
        lab: Some("Home".to_string()),
        ..Default::default()
    };
    let saved = update(&db, roll.roll.id, changes, date(2023, 6, 17))
        .await
        .unwrap();

    assert_eq!("50mm f/1.4", saved.roll.lens);
    assert_eq!("Summer trip", saved.roll.notes);
    assert_eq!("Home", saved.roll.lab);
    assert_eq!("", saved.roll.scanner);
}
