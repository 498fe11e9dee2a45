//! Travelling projectile movement and expiry.

use hecs::World;

use broadside_core::components::{Hull, Projectile, Transform};
use broadside_core::constants::PROJECTILE_MAX_LIFETIME_SECS;
use broadside_core::geometry::heading_vector;

use crate::systems::StepContext;

/// Fly every live projectile straight along its heading. Projectiles that
/// outlive their lifetime or leave the arena are spent.
pub fn run(world: &mut World, ctx: &mut StepContext) {
    for (_entity, (transform, hull, projectile)) in
        world.query_mut::<(&mut Transform, &mut Hull, &mut Projectile)>()
    {
        if projectile.spent {
            continue;
        }
        projectile.age_secs += ctx.delta;
        transform.position += heading_vector(transform.rotation) * projectile.speed * ctx.delta;
        hull.sync(transform);

        if projectile.age_secs >= PROJECTILE_MAX_LIFETIME_SECS
            || !ctx.arena.contains(transform.position)
        {
            projectile.spent = true;
        }
    }
}
