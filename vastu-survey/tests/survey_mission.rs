//! End-to-end survey missions in a simulated room.

mod common;

use approx::assert_relative_eq;
use common::{
    MAX_RANGE, RoomDriver, RoomScanner, exact_config, rectangular_room, room_with_walls,
};
use vastu_survey::{
    Angle, FLAT_ANGLE, Maneuver, MissionState, Point, Pose, SurveyError, SurveyMission, Surveyor,
    WallFollower, WallSide,
};

const ROOM_WIDTH: f32 = 300.0;
const ROOM_HEIGHT: f32 = 200.0;

fn start_pose() -> Pose {
    Pose::new(Point::new(120.0, 90.0), Angle::default())
}

fn mission(
    room: &common::SharedRoom,
    config: &vastu_survey::SurveyConfig,
) -> SurveyMission<RoomScanner, RoomDriver> {
    let surveyor = Surveyor::new(
        RoomScanner(room.clone()),
        RoomDriver(room.clone()),
        config.tour.clone(),
        config.robot.clone(),
    )
    .with_pose(start_pose());
    SurveyMission::new(surveyor, WallFollower::new(config.navigation.station_step))
}

#[test]
fn test_mission_in_closed_room() {
    let config = exact_config();
    let room = rectangular_room(ROOM_WIDTH, ROOM_HEIGHT, start_pose(), config.robot.sensor_offset());
    let mut mission = mission(&room, &config);

    const TOURS: usize = 8;
    for i in 0..TOURS {
        let report = mission.run_tour().unwrap();
        assert_eq!(report.station, i);
        // dead reckoning matches the simulated robot exactly
        let truth = room.borrow().pose;
        assert_relative_eq!(report.pose.position.x, truth.position.x, epsilon = 1e-2);
        assert_relative_eq!(report.pose.position.y, truth.position.y, epsilon = 1e-2);
    }

    let map = mission.map();
    assert_eq!(map.len(), TOURS);
    let bounds = map.bounds().unwrap();
    for node in map.nodes() {
        assert!(bounds.contains(node.position()));
        for p in node.points() {
            assert!(bounds.contains(p.position));
        }
    }
    assert!(map.wall_count() > 0);
}

#[test]
fn test_valid_points_lie_on_room_walls() {
    let config = exact_config();
    let room = rectangular_room(ROOM_WIDTH, ROOM_HEIGHT, start_pose(), config.robot.sensor_offset());
    let mut mission = mission(&room, &config);
    for _ in 0..4 {
        mission.run_tour().unwrap();
    }

    let room = room.borrow();
    for node in mission.map().nodes() {
        for p in node.points().iter().filter(|p| p.is_valid) {
            if p.raw_distance < MAX_RANGE {
                assert!(room.distance_to_walls(p.position) < 0.5, "stray point {:?}", p);
            }
        }
    }
}

#[test]
fn test_first_station_near_a_corner() {
    // 50 cm from the south wall, 60 cm from the west wall, facing north
    let config = exact_config();
    let pose = Pose::new(Point::new(60.0, 50.0), Angle::default());
    let room = rectangular_room(ROOM_WIDTH, ROOM_HEIGHT, pose, config.robot.sensor_offset());
    let surveyor = Surveyor::new(
        RoomScanner(room.clone()),
        RoomDriver(room.clone()),
        config.tour.clone(),
        config.robot.clone(),
    )
    .with_pose(pose);
    let mut mission = SurveyMission::new(surveyor, WallFollower::new(50.0));
    let report = mission.run_tour().unwrap();

    let station = &mission.map().nodes()[0];
    assert_eq!(station.len(), 36);
    assert_eq!(report.walls, station.walls().len());
    assert!(station.nearest_wall().is_some());
    // the readings straight behind fit the south wall exactly
    assert!(station.walls().iter().any(|w| {
        w.q() > 0.99 && (w.distance_from(station.position()).unwrap() - 50.0).abs() < 0.5
    }));
    assert_ne!(report.maneuver.name(), "Advance");
}

#[test]
fn test_far_walls_give_no_valid_points() {
    // at 90 cm and beyond, 10 degree steps land more than 15 cm apart
    let config = exact_config();
    let room = rectangular_room(ROOM_WIDTH, ROOM_HEIGHT, start_pose(), config.robot.sensor_offset());
    let mut mission = mission(&room, &config);
    let report = mission.run_tour().unwrap();

    assert_eq!(report.walls, 0);
    let Maneuver::TurnAndAdvance { distance, .. } = report.maneuver else {
        panic!("unexpected maneuver {:?}", report.maneuver);
    };
    let nearest = mission.map().nodes()[0].nearest_point().unwrap().raw_distance;
    assert_relative_eq!(distance, nearest - 50.0);
}

#[test]
fn test_corridor_dead_end_turns_around() {
    // dead end facing north: short wall 20 cm ahead, side walls 40 cm
    // left and right, separated by gaps the sensor sees through
    let mut config = exact_config();
    config.robot.sensor_offset_y = 0.0;
    let pose = Pose::new(Point::new(0.0, 0.0), Angle::default());
    let walls = vec![
        (Point::new(-12.0, 20.0), Point::new(12.0, 20.0)),
        (Point::new(-40.0, -20.0), Point::new(-40.0, 20.0)),
        (Point::new(40.0, -20.0), Point::new(40.0, 20.0)),
    ];
    let room = room_with_walls(walls, pose, config.robot.sensor_offset());
    let surveyor = Surveyor::new(
        RoomScanner(room.clone()),
        RoomDriver(room.clone()),
        config.tour.clone(),
        config.robot.clone(),
    )
    .with_pose(pose);
    let mut mission = SurveyMission::new(surveyor, WallFollower::new(50.0));
    let report = mission.run_tour().unwrap();

    let station = &mission.map().nodes()[0];
    assert_eq!(station.walls().len(), 3);
    assert_eq!(station.left_wall().map(|w| w.len()), Some(5));
    assert_eq!(station.right_wall().map(|w| w.len()), Some(5));
    let nearest = station.nearest_wall().unwrap();
    assert_eq!(nearest.side(), WallSide::Front);
    assert_eq!(nearest.len(), 7);
    assert_relative_eq!(nearest.distance_from(pose.position).unwrap(), 20.0, epsilon = 1e-2);

    assert_eq!(report.maneuver, Maneuver::Turn { angle: FLAT_ANGLE });
    assert_relative_eq!(mission.pose().orientation.degrees(), 180.0, epsilon = 1e-3);
    assert_eq!(mission.pose().position, pose.position);
}

#[test]
fn test_hardware_failure_halts_mission() {
    let config = exact_config();
    let room = rectangular_room(ROOM_WIDTH, ROOM_HEIGHT, start_pose(), config.robot.sensor_offset());
    room.borrow_mut().fail_after = Some(0);
    let mut mission = mission(&room, &config);

    let err = mission.run_tour().unwrap_err();
    assert!(matches!(err, SurveyError::Hardware(_)));
    assert_eq!(mission.state(), MissionState::Idle);
    // the station was surveyed before the move failed
    assert_eq!(mission.map().len(), 1);
    assert_eq!(mission.pose(), start_pose());
}
