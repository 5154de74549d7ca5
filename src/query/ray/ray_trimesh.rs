use crate::math::Real;
use crate::partitioning::BvhNode;
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::TriMesh;

impl RayCast for TriMesh {
    #[inline]
    fn cast_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> Option<Real> {
        self.bvh()
            .cast_ray(ray, max_time_of_impact, |triangle, best_so_far| {
                self.triangle(triangle).cast_local_ray(ray, best_so_far)
            })
            .map(|(_, toi)| toi)
    }

    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
    ) -> Option<RayIntersection> {
        self.bvh()
            .find_best(
                max_time_of_impact,
                |node: &BvhNode, best_so_far| node.cast_ray(ray, best_so_far),
                |triangle, best_so_far| {
                    let mut inter = self
                        .triangle(triangle)
                        .cast_local_ray_and_get_normal(ray, best_so_far)?;
                    inter.triangle = triangle;
                    Some((inter.time_of_impact, inter))
                },
            )
            .map(|(_, inter)| inter)
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::query::{Ray, RayCast};
    use crate::transformation::aabb_to_trimesh;

    #[test]
    fn nearest_hit_on_box_mesh() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let mesh = aabb_to_trimesh(&aabb, false);

        let ray = Ray::new(Point::new(0.2, 0.3, -4.0), Vector::z());
        let hit = mesh.cast_local_ray_and_get_normal(&ray, Real::MAX).unwrap();
        assert!(relative_eq!(hit.time_of_impact, 3.0));
        assert!(relative_eq!(hit.normal, -Vector::z()));
        assert!(!hit.is_backface);

        // From inside, the far wall is hit from its back side.
        let inside = Ray::new(Point::new(0.2, 0.3, 0.0), Vector::z());
        let hit = mesh.cast_local_ray_and_get_normal(&inside, Real::MAX).unwrap();
        assert!(relative_eq!(hit.time_of_impact, 1.0));
        assert!(hit.is_backface);
    }

    #[test]
    fn reported_triangle_matches_hit_point() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let mesh = aabb_to_trimesh(&aabb, false);
        let ray = Ray::new(Point::new(5.0, 0.1, -0.2), -Vector::x());
        let hit = mesh.cast_local_ray_and_get_normal(&ray, Real::MAX).unwrap();
        let tri = mesh.triangle(hit.triangle);
        assert!(relative_eq!(tri.a.x, 1.0));
        assert!(relative_eq!(tri.b.x, 1.0));
        assert!(relative_eq!(tri.c.x, 1.0));
        assert_eq!(mesh.cast_local_ray(&ray, 3.0), None);
    }
}
