// Distributes a league's roster into groups, phase by phase.
//
// The first phase deals players out by roster index. Every later phase
// reshuffles the previous phase's groups with a fixed offset formula, so that
// players keep meeting new opponents. The formula is a compatibility contract:
// standings of existing leagues depend on the exact group compositions.
use crate::{
    error::Error,
    league::{group::Group, schedule_generator, League},
    types::{Db, Phase, PlayerId}
};

// Partition the roster for the first phase.
// NOTE: group_count is the number of groups, not the size of one.
pub fn partition_initial(players: &[PlayerId], group_count: u8) -> Result<Vec<Vec<PlayerId>>, Error> {
    if group_count == 0 {
        return Err(Error::InvalidConfiguration);
    }

    let count = group_count as usize;
    let mut groups: Vec<Vec<PlayerId>> = vec![Vec::new(); count];
    for (i, player_id) in players.iter().enumerate() {
        groups[i % count].push(*player_id);
    }

    return Ok(groups);
}

// Partition the groups of the given phase out of the previous phase's groups.
// New group i draws one player from every previous group, picked at an offset
// that changes with the phase. Previous groups too short for the offset
// contribute nothing.
pub fn partition_next(previous: &[Vec<PlayerId>], phase: Phase, group_count: u8) -> Result<Vec<Vec<PlayerId>>, Error> {
    if group_count == 0 {
        return Err(Error::InvalidConfiguration);
    }

    let count = group_count as usize;
    let mut groups: Vec<Vec<PlayerId>> = Vec::new();

    for i in 0..count {
        let mut members = Vec::new();
        for j in 0..count {
            let prev_group = &previous[j % count];
            let position = (j * (phase as usize - 1) + i) % count;

            if position < prev_group.len() {
                members.push(prev_group[position]);
            }
        }

        groups.push(members);
    }

    return Ok(groups);
}

// Create and save every phase of a league, fixtures included.
// Memberships of all phases are fixed here, at league start.
pub async fn create_all_phases(db: &Db, league: &League, group_count: u8, phases: Phase) -> Result<Vec<Group>, Error> {
    let roster = league.player_ids(db).await;
    let mut memberships = partition_initial(&roster, group_count)?;

    let mut groups = save_phase(db, league, 0, group_count, &memberships).await;

    for phase in 1..phases {
        memberships = partition_next(&memberships, phase, group_count)?;
        groups.append(&mut save_phase(db, league, phase, group_count, &memberships).await);
    }

    return Ok(groups);
}

// Save the groups of one phase and generate their fixtures.
async fn save_phase(db: &Db, league: &League, phase: Phase, group_count: u8, memberships: &[Vec<PlayerId>]) -> Vec<Group> {
    let mut groups = Vec::new();
    for members in memberships.iter() {
        let group = Group::build_and_save(db, league.id, phase, group_count, members).await;
        schedule_generator::generate_fixtures(db, &group).await;
        groups.push(group);
    }

    return groups;
}
