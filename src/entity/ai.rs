//! Module Ai
//!
//! Every live unit in slots 1..64 runs the behaviour of its type once its primary timer expired.
//! The type ids are fixed by the level format.

use crate::entity::{door, explosion, gadget, robot, weapon};
use crate::game::State;
use crate::platform::Platform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Empty,
    Player,
    LeftRightDroid,
    UpDownDroid,
    HoverAttack,
    WaterDroid,
    TimeBomb,
    TransporterPad,
    DeadRobot,
    Evilbot,
    Door,
    SmallExplosion,
    FireUp,
    FireDown,
    FireLeft,
    FireRight,
    TrashCompactor,
    UpDownRollerbot,
    LeftRightRollerbot,
    Elevator,
    Magnet,
    Haywire,
    WaterRaft,
    Dematerialize,
}

impl UnitKind {
    /// Behaviour for a unit type id, `None` for ids without one (hidden items use 128 and up).
    pub fn from_id(id: u8) -> Option<UnitKind> {
        use UnitKind::*;
        let kind = match id {
            0 => Empty,
            1 => Player,
            2 => LeftRightDroid,
            3 => UpDownDroid,
            4 => HoverAttack,
            5 => WaterDroid,
            6 => TimeBomb,
            7 => TransporterPad,
            8 => DeadRobot,
            9 => Evilbot,
            10 => Door,
            11 => SmallExplosion,
            12 => FireUp,
            13 => FireDown,
            14 => FireLeft,
            15 => FireRight,
            16 => TrashCompactor,
            17 => UpDownRollerbot,
            18 => LeftRightRollerbot,
            19 => Elevator,
            20 => Magnet,
            21 => Haywire,
            22 => WaterRaft,
            23 => Dematerialize,
            _ => return None,
        };
        Some(kind)
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Run one step of the behaviour of the unit in `slot`.
pub fn run(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    use crate::entity::movement::Direction::*;
    use UnitKind::*;
    let Some(kind) = UnitKind::from_id(state.world.units[slot].kind) else {
        return;
    };
    trace!("slot {} runs {:?}", slot, kind);
    match kind {
        Empty | Player => {}
        LeftRightDroid => robot::hover_patrol(state, slot, false),
        UpDownDroid => robot::hover_patrol(state, slot, true),
        HoverAttack => robot::hover_attack(state, platform, slot),
        WaterDroid => robot::water_droid(state, slot),
        TimeBomb => explosion::time_bomb(state, platform, slot),
        TransporterPad => gadget::transporter_pad(state, platform, slot),
        DeadRobot => robot::dead_robot(state, slot),
        Evilbot => robot::evilbot(state, platform, slot),
        Door => door::door(state, platform, slot),
        SmallExplosion => weapon::small_explosion(state, slot),
        FireUp => weapon::projectile(state, platform, slot, Up),
        FireDown => weapon::projectile(state, platform, slot, Down),
        FireLeft => weapon::projectile(state, platform, slot, Left),
        FireRight => weapon::projectile(state, platform, slot, Right),
        TrashCompactor => door::trash_compactor(state, platform, slot),
        UpDownRollerbot => robot::rollerbot(state, platform, slot, true),
        LeftRightRollerbot => robot::rollerbot(state, platform, slot, false),
        Elevator => door::elevator(state, platform, slot),
        Magnet => gadget::magnet(state, platform, slot),
        Haywire => robot::haywire(state, slot),
        WaterRaft => gadget::water_raft(state, platform, slot),
        Dematerialize => gadget::dematerialize(state, slot),
    }
}
