//! Mission state machine: briefing, transport, deployment, combat.
//!
//! Transitions are driven only by explicit player commands and are gated by
//! proximity checks. A rejected command leaves the state untouched.

use hecs::{Entity, World};
use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use riot_core::components::{Body, Officer, Rioter};
use riot_core::constants::*;
use riot_core::enums::MissionPhase;
use riot_core::events::GameEvent;
use riot_core::types::Position;
use riot_core::venue::{RiotCause, VenueConfig};

/// Mission data model. Held by the engine for the whole mission.
#[derive(Debug, Clone)]
pub struct MissionState {
    pub phase: MissionPhase,
    pub cause: RiotCause,
    /// Fixed for the mission once selected.
    pub venue: VenueConfig,
    /// Transport top-left corner.
    pub truck_position: Position,
    pub riot_started: bool,
    pub briefing_shown: bool,
    pub briefing_acknowledged: bool,
    /// Clock reading when the mission started.
    pub started_at_ms: f64,
}

impl MissionState {
    pub fn new(cause: RiotCause, venue: VenueConfig, now_ms: f64) -> Self {
        Self {
            phase: MissionPhase::Briefing,
            cause,
            venue,
            truck_position: Position::new(venue.start_x, GROUND_LEVEL - TRUCK_GROUND_OFFSET),
            riot_started: false,
            briefing_shown: false,
            briefing_acknowledged: false,
            started_at_ms: now_ms,
        }
    }

    pub fn in_transport(&self) -> bool {
        self.phase == MissionPhase::InTransport
    }

    /// Offer the briefing once its delay has passed.
    pub fn update_briefing(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) {
        if !self.briefing_shown && now_ms - self.started_at_ms >= BRIEFING_DELAY_MS {
            self.briefing_shown = true;
            events.push(GameEvent::BriefingReady {
                cause: self.cause.clone(),
            });
        }
    }

    pub fn acknowledge_briefing(&mut self, events: &mut Vec<GameEvent>) {
        if self.briefing_acknowledged {
            return;
        }
        self.briefing_acknowledged = true;
        if self.phase == MissionPhase::Briefing {
            self.phase = MissionPhase::Staging;
        }
        events.push(GameEvent::Objective {
            text: "Proceed to the transport".to_string(),
        });
    }

    /// Player is grounded and within the door window.
    pub fn near_transport_door(&self, player: &Body) -> bool {
        if player.position.y < player.ground_y() - TRUCK_GROUND_TOLERANCE {
            return false;
        }
        let door_x = self.truck_position.x + TRUCK_DOOR_OFFSET;
        (door_x - player.position.x).abs() < TRUCK_INTERACT_RANGE
    }

    /// Transport is parked close enough to the riot site.
    pub fn near_riot(&self) -> bool {
        (self.truck_position.x - SPAWN_DISTANCE).abs() < RIOT_ZONE_RANGE
    }

    /// Board the transport with the whole squad. Returns false if rejected.
    pub fn enter_transport(
        &mut self,
        world: &mut World,
        player: Entity,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.in_transport() {
            return false;
        }
        let near = world
            .get::<&Body>(player)
            .map(|body| self.near_transport_door(&body))
            .unwrap_or(false);
        if !near {
            debug!("transport entry rejected: player away from the door");
            return false;
        }

        self.phase = MissionPhase::InTransport;
        if let Ok(mut body) = world.get::<&mut Body>(player) {
            body.position = self.driver_seat();
            body.velocity.y = 0.0;
            body.is_jumping = false;
        }

        for (index, (_entity, officer)) in world.query_mut::<&mut Officer>().into_iter().enumerate() {
            officer.in_transport = true;
            officer.transport_offset = Some(Position::new(
                SEAT_ORIGIN_X + (index % SEAT_COLUMNS) as f64 * SEAT_SPACING_X,
                SEAT_ORIGIN_Y + (index / SEAT_COLUMNS) as f64 * SEAT_SPACING_Y,
            ));
        }

        info!("boarded transport at x={:.0}", self.truck_position.x);
        events.push(GameEvent::Objective {
            text: "Drive to the riot location and deploy when in position".to_string(),
        });
        true
    }

    /// Leave the transport. At the riot site this starts the riot.
    pub fn exit_transport(
        &mut self,
        world: &mut World,
        player: Entity,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.in_transport() {
            return false;
        }

        let at_riot = self.near_riot();
        let exit_x = if at_riot {
            self.truck_position.x + TRUCK_COMBAT_EXIT_OFFSET
        } else {
            self.truck_position.x + TRUCK_DOOR_OFFSET
        };
        if let Ok(mut body) = world.get::<&mut Body>(player) {
            body.position = Position::new(exit_x, body.ground_y());
            body.velocity.y = 0.0;
            body.is_jumping = false;
        }

        if at_riot {
            self.start_riot(world, events);
        } else {
            self.phase = if self.riot_started {
                MissionPhase::Combat
            } else {
                MissionPhase::Staging
            };
        }
        true
    }

    /// Unload every officer in a line to the right of the transport, then
    /// exit at the riot site. Only valid while driving near the riot.
    pub fn deploy(
        &mut self,
        world: &mut World,
        player: Entity,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.in_transport() || !self.near_riot() {
            debug!("deploy rejected: not driving near the riot");
            return false;
        }

        let truck_x = self.truck_position.x;
        let mut deployed = 0;
        for (index, (_entity, (officer, body))) in world
            .query_mut::<(&mut Officer, &mut Body)>()
            .into_iter()
            .enumerate()
        {
            officer.in_transport = false;
            officer.transport_offset = None;
            let col = (index % DEPLOY_COLUMNS) as f64;
            let jitter = (rng.gen::<f64>() - 0.5) * DEPLOY_JITTER;
            body.position = Position::new(
                truck_x + DEPLOY_OFFSET_X + col * DEPLOY_SPACING_X + jitter,
                body.ground_y(),
            );
            body.velocity.y = 0.0;
            body.is_jumping = false;
            deployed += 1;
        }

        info!("deployed {deployed} officers at x={truck_x:.0}");
        self.exit_transport(world, player, events);
        events.push(GameEvent::Objective {
            text: "Officers deployed. Contain the riot!".to_string(),
        });
        true
    }

    /// Drive the transport one frame, clamped to the venue boundaries.
    pub fn drive(&mut self, left: bool, right: bool) {
        let bounds = self.venue.boundaries;
        if right {
            let next = self.truck_position.x + TRUCK_SPEED;
            if next < bounds.right - TRUCK_WIDTH {
                self.truck_position.x = next;
            }
        }
        if left {
            let next = self.truck_position.x - TRUCK_SPEED;
            if next > bounds.left {
                self.truck_position.x = next;
            }
        }
    }

    pub fn driver_seat(&self) -> Position {
        self.truck_position
            .offset(TRUCK_DOOR_OFFSET, TRUCK_SEAT_Y_OFFSET)
    }

    fn start_riot(&mut self, world: &mut World, events: &mut Vec<GameEvent>) {
        self.phase = MissionPhase::Combat;
        if !self.riot_started {
            info!("riot started at {}", self.cause.venue);
            events.push(GameEvent::Objective {
                text: "Contain the riot!".to_string(),
            });
        }
        self.riot_started = true;
        activate_rioters(world);
    }
}

/// Wake every rioter.
pub fn activate_rioters(world: &mut World) {
    for (_entity, rioter) in world.query_mut::<&mut Rioter>() {
        rioter.active = true;
    }
}
